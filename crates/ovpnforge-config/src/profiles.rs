//! Server and client configuration profiles.
//!
//! The fixed directive tables for an OpenVPN server and its clients,
//! parameterized by explicit options structs. Profile construction uses
//! the fatal API tier: a duplicate directive in these tables is a
//! programming error, not recoverable input.

use serde::{Deserialize, Serialize};

use crate::document::Document;

/// Default remote host for client configurations.
pub const DEFAULT_HOST: &str = "192.168.1.87";
/// Default OpenVPN port.
pub const DEFAULT_PORT: u16 = 1194;
/// Default transport protocol.
pub const DEFAULT_PROTO: &str = "udp";
/// Default VPN network address.
pub const DEFAULT_NETWORK: &str = "10.9.0.0";
/// Default VPN network mask.
pub const DEFAULT_NETWORK_MASK: &str = "255.255.0.0";
/// Default primary DNS server pushed to clients.
pub const DEFAULT_DNS1: &str = "8.8.8.8";
/// Default secondary DNS server pushed to clients.
pub const DEFAULT_DNS2: &str = "8.8.4.4";

/// Options for building a server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerOptions {
    /// Listening port.
    pub port: u16,
    /// Transport protocol (`udp` or `tcp`).
    pub proto: String,
    /// VPN network address.
    pub network: String,
    /// VPN network mask.
    pub netmask: String,
    /// Primary DNS server pushed to clients.
    pub dns1: String,
    /// Secondary DNS server pushed to clients.
    pub dns2: String,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            proto: DEFAULT_PROTO.into(),
            network: DEFAULT_NETWORK.into(),
            netmask: DEFAULT_NETWORK_MASK.into(),
            dns1: DEFAULT_DNS1.into(),
            dns2: DEFAULT_DNS2.into(),
        }
    }
}

/// Options for building a client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientOptions {
    /// Address of the remote OpenVPN server.
    pub remote: String,
    /// Remote port.
    pub port: u16,
    /// Transport protocol (`udp` or `tcp`).
    pub proto: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            remote: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
            proto: DEFAULT_PROTO.into(),
        }
    }
}

/// Builds the server configuration document.
///
/// Key and certificate material is embedded separately by the caller
/// (`ca`, `cert`, `key`, `dh`, `tls-crypt` blocks).
#[must_use]
pub fn server_config(options: &ServerOptions) -> Document {
    let doc = Document::new();

    doc.must_set("port", &[options.port]);
    doc.must_set("proto", &[options.proto.as_str()]);
    doc.must_set("dev", &["tun"]);

    doc.must_set("topology", &["subnet"]);

    doc.must_set("server", &[options.network.as_str(), options.netmask.as_str()]);
    doc.must_set("route", &[options.network.as_str(), options.netmask.as_str()]);

    doc.must_set("ifconfig-pool-persist", &["ipp.txt"]);
    doc.must_set("client-config-dir", &["ccd"]);

    doc.must_add("push", &["redirect-gateway def1 bypass-dhcp"]);

    doc.must_add("push", &[format!("dhcp-option DNS {}", options.dns1)]);
    doc.must_add("push", &[format!("dhcp-option DNS {}", options.dns2)]);

    doc.must_enable("client-to-client");
    doc.must_set("keepalive", &[10, 120]);

    doc.must_add("push", &["ping 15"]);
    doc.must_add("push", &["ping-restart 60"]);

    doc.must_set("cipher", &["AES-256-GCM"]);
    doc.must_set(
        "ncp-ciphers",
        &["AES-256-GCM:AES-256-CBC:AES-128-GCM:AES-128-CBC:BF-CBC"],
    );

    doc.must_enable("comp-lzo");

    doc.must_set("user", &["nobody"]);
    doc.must_set("group", &["nobody"]);

    doc.must_enable("persist-key");
    doc.must_enable("persist-tun");

    doc.must_set("verb", &[5]);

    doc.must_set("sndbuf", &[0]);
    doc.must_set("rcvbuf", &[0]);

    doc.must_add("push", &["sndbuf 0"]);
    doc.must_add("push", &["rcvbuf 0"]);

    doc.must_set("fragment", &[0]);
    doc.must_set("mssfix", &[0]);

    doc.must_set("remote-cert-eku", &["TLS Web Client Authentication"]);

    doc
}

/// Builds the client configuration document.
///
/// Key and certificate material is embedded separately by the caller
/// (`ca`, `cert`, `key`, `tls-crypt` blocks).
#[must_use]
pub fn client_config(options: &ClientOptions) -> Document {
    let doc = Document::new();

    doc.must_enable("client");
    doc.must_set("dev", &["tun"]);
    doc.must_set("proto", &[options.proto.as_str()]);
    doc.must_set("keysize", &[256]);
    doc.must_set(
        "remote",
        &[options.remote.clone(), options.port.to_string()],
    );
    doc.must_set("resolv-retry", &["infinite"]);

    doc.must_set("cipher", &["AES-256-CBC"]);
    doc.must_enable("nobind");
    doc.must_set("link-mtu", &[1550]);
    doc.must_enable("persist-key");
    doc.must_enable("persist-tun");
    doc.must_enable("comp-lzo");
    doc.must_set("verb", &[3]);

    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(doc: &Document) -> String {
        String::from_utf8(doc.render()).expect("rendered output is UTF-8")
    }

    #[test]
    fn server_config_starts_with_port() {
        let doc = server_config(&ServerOptions::default());
        let output = rendered(&doc);

        assert!(output.starts_with("port \"1194\""));
    }

    #[test]
    fn server_config_contains_network_directives() {
        let options = ServerOptions {
            network: "10.20.0.0".into(),
            netmask: "255.255.255.0".into(),
            ..ServerOptions::default()
        };
        let output = rendered(&server_config(&options));

        assert!(output.contains("server \"10.20.0.0\" \"255.255.255.0\""));
        assert!(output.contains("route \"10.20.0.0\" \"255.255.255.0\""));
    }

    #[test]
    fn server_config_pushes_in_call_order() {
        let output = rendered(&server_config(&ServerOptions::default()));

        let pushes: Vec<&str> = output
            .lines()
            .filter(|line| line.starts_with("push "))
            .collect();

        assert_eq!(pushes.len(), 7);
        assert_eq!(pushes[0], "push \"redirect-gateway def1 bypass-dhcp\"");
        assert_eq!(pushes[1], "push \"dhcp-option DNS 8.8.8.8\"");
        assert_eq!(pushes[2], "push \"dhcp-option DNS 8.8.4.4\"");
        assert_eq!(pushes[5], "push \"sndbuf 0\"");
        assert_eq!(pushes[6], "push \"rcvbuf 0\"");
    }

    #[test]
    fn server_config_has_flags_unquoted() {
        let output = rendered(&server_config(&ServerOptions::default()));

        assert!(output.lines().any(|line| line == "client-to-client"));
        assert!(output.lines().any(|line| line == "persist-tun"));
        assert!(output.lines().any(|line| line == "comp-lzo"));
    }

    #[test]
    fn client_config_starts_with_client_flag() {
        let output = rendered(&client_config(&ClientOptions::default()));

        assert!(output.starts_with("client\n"));
    }

    #[test]
    fn client_config_remote_carries_host_and_port() {
        let options = ClientOptions {
            remote: "vpn.example.com".into(),
            port: 443,
            proto: "tcp".into(),
        };
        let output = rendered(&client_config(&options));

        assert!(output.contains("remote \"vpn.example.com\" \"443\""));
        assert!(output.contains("proto \"tcp\""));
    }

    #[test]
    fn options_defaults_use_named_constants() {
        let server = ServerOptions::default();
        assert_eq!(server.port, DEFAULT_PORT);
        assert_eq!(server.network, DEFAULT_NETWORK);

        let client = ClientOptions::default();
        assert_eq!(client.remote, DEFAULT_HOST);
        assert_eq!(client.proto, DEFAULT_PROTO);
    }

    #[test]
    fn options_serialization_round_trips() {
        let options = ServerOptions::default();
        let json = serde_json::to_string(&options).unwrap();
        let deserialized: ServerOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(options, deserialized);
    }
}
