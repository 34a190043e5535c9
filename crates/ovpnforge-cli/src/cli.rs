//! Command-line argument parsing with clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use ovpnforge_config::profiles::{
    DEFAULT_DNS1, DEFAULT_DNS2, DEFAULT_NETWORK, DEFAULT_NETWORK_MASK, DEFAULT_PORT,
    DEFAULT_PROTO,
};
use ovpnforge_pki::types::{
    DEFAULT_COMMON_NAME, DEFAULT_COUNTRY, DEFAULT_LOCALITY, DEFAULT_ORGANIZATION, SubjectProfile,
};

/// ovpnforge - a configuration file generator for OpenVPN.
#[derive(Parser, Debug, Clone)]
#[command(name = "ovpnforge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Create a self-signed CA certificate.
    BuildCa(BuildCaArgs),

    /// Create and sign a server certificate.
    BuildServerCert(BuildServerCertArgs),

    /// Create and sign a client certificate.
    BuildClientCert(BuildClientCertArgs),

    /// Create a server.conf file for OpenVPN.
    ServerConfig(ServerConfigArgs),

    /// Create a client.ovpn file for OpenVPN clients.
    ClientConfig(ClientConfigArgs),

    /// Create a static key for tls-crypt.
    StaticKey(StaticKeyArgs),
}

/// Certificate subject fields shared by the issuance commands.
#[derive(Args, Debug, Clone)]
pub struct SubjectArgs {
    /// Subject organization.
    #[arg(long, default_value = DEFAULT_ORGANIZATION)]
    pub org: String,

    /// Subject country.
    #[arg(long, default_value = DEFAULT_COUNTRY)]
    pub country: String,

    /// Subject locality.
    #[arg(long, default_value = DEFAULT_LOCALITY)]
    pub locality: String,
}

impl SubjectArgs {
    /// Builds a subject profile with the given common name.
    #[must_use]
    pub fn profile(&self, common_name: &str) -> SubjectProfile {
        SubjectProfile {
            organization: self.org.clone(),
            common_name: common_name.to_string(),
            country: self.country.clone(),
            locality: self.locality.clone(),
        }
    }
}

/// Arguments for the build-ca command.
#[derive(Args, Debug, Clone)]
pub struct BuildCaArgs {
    /// Base name of the CA files, e.g.: {basename}.{crt,key}.
    #[arg(short, long, default_value = "ca")]
    pub basename: String,

    /// CA common name.
    #[arg(long, default_value = DEFAULT_COMMON_NAME)]
    pub cn: String,

    #[command(flatten)]
    pub subject: SubjectArgs,
}

/// Arguments for the build-server-cert command.
#[derive(Args, Debug, Clone)]
pub struct BuildServerCertArgs {
    /// Server's common name.
    #[arg(short, long, default_value = "server")]
    pub name: String,

    /// CA certificate path.
    #[arg(short = 'c', long, default_value = "ca.crt")]
    pub ca_cert: PathBuf,

    /// CA private key path.
    #[arg(short = 'k', long, default_value = "ca.key")]
    pub ca_key: PathBuf,

    #[command(flatten)]
    pub subject: SubjectArgs,
}

/// Arguments for the build-client-cert command.
#[derive(Args, Debug, Clone)]
pub struct BuildClientCertArgs {
    /// Name of the client.
    #[arg(short = 'n', long, default_value = "client")]
    pub commonname: String,

    /// CA certificate path.
    #[arg(short = 'c', long, default_value = "ca.crt")]
    pub ca_cert: PathBuf,

    /// CA private key path.
    #[arg(short = 'k', long, default_value = "ca.key")]
    pub ca_key: PathBuf,

    #[command(flatten)]
    pub subject: SubjectArgs,
}

/// Arguments for the server-config command.
#[derive(Args, Debug, Clone)]
pub struct ServerConfigArgs {
    /// CA certificate.
    #[arg(short = 'r', long, default_value = "ca.crt")]
    pub ca: PathBuf,

    /// Server certificate.
    #[arg(short = 'c', long, default_value = "server.crt")]
    pub cert: PathBuf,

    /// Server private key.
    #[arg(short = 'k', long, default_value = "server.key")]
    pub key: PathBuf,

    /// Diffie-Hellman key exchange file.
    #[arg(short = 'd', long, default_value = "dh.pem")]
    pub dh: PathBuf,

    /// TLS authentication key.
    #[arg(short = 't', long, default_value = "key.tlsauth")]
    pub tls_crypt: PathBuf,

    /// Network.
    #[arg(long, default_value = DEFAULT_NETWORK)]
    pub network: String,

    /// Netmask.
    #[arg(long, default_value = DEFAULT_NETWORK_MASK)]
    pub netmask: String,

    /// Primary DNS server pushed to clients.
    #[arg(long, default_value = DEFAULT_DNS1)]
    pub dns1: String,

    /// Secondary DNS server pushed to clients.
    #[arg(long, default_value = DEFAULT_DNS2)]
    pub dns2: String,

    /// Listening port.
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Transport protocol.
    #[arg(long, default_value = DEFAULT_PROTO)]
    pub proto: String,

    /// Output file.
    #[arg(short = 'o', long, default_value = "server.conf")]
    pub output: PathBuf,
}

/// Arguments for the client-config command.
#[derive(Args, Debug, Clone)]
pub struct ClientConfigArgs {
    /// CA certificate.
    #[arg(short = 'r', long, default_value = "ca.crt")]
    pub ca_cert: PathBuf,

    /// Client certificate.
    #[arg(short = 'c', long, default_value = "client.crt")]
    pub cert: PathBuf,

    /// Client private key.
    #[arg(short = 'k', long, default_value = "client.key")]
    pub key: PathBuf,

    /// TLS authentication key.
    #[arg(short = 't', long, default_value = "key.tlsauth")]
    pub tls_crypt: PathBuf,

    /// Address of the remote OpenVPN server.
    #[arg(long, required = true)]
    pub remote: String,

    /// Remote port.
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Transport protocol.
    #[arg(long, default_value = DEFAULT_PROTO)]
    pub proto: String,

    /// Output file.
    #[arg(short = 'o', long, default_value = "client.ovpn")]
    pub output: PathBuf,
}

/// Arguments for the static-key command.
#[derive(Args, Debug, Clone)]
pub struct StaticKeyArgs {
    /// Output file.
    #[arg(short = 'o', long, default_value = "key.tlsauth")]
    pub output: PathBuf,
}
