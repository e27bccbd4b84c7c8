use std::{
    fs,
    path::{Path, PathBuf},
};

use pem::Pem;
use thiserror::Error;
use tracing::{debug, instrument};

const CERTIFICATE_TAG: &str = "CERTIFICATE";
const ENCRYPTED_PRIVATE_KEY_TAG: &str = "ENCRYPTED PRIVATE KEY";
const PRIVATE_KEY_TAGS: [&str; 3] = ["PRIVATE KEY", "RSA PRIVATE KEY", "EC PRIVATE KEY"];

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("failed to parse PEM: {0}")]
    Pem(#[from] pem::PemError),

    #[error("no certificate found")]
    NoCertificate,

    #[error("no private key found")]
    NoPrivateKey,

    #[error("private key is encrypted, only unencrypted keys are supported")]
    EncryptedPrivateKey,
}

#[derive(Debug, Error)]
pub enum CertificateError {
    #[error("Error retrieving certificate `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error retrieving certificate `{}`: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: IdentityError,
    },

    #[error("Error retrieving certificate `{}`: {reason}", path.display())]
    Rejected { path: PathBuf, reason: String },
}

/// TLS client identity, kept as PEM so it can be handed to the APNs client
/// as is.
pub struct Identity {
    pub certificate_pem: Vec<u8>,
    pub private_key_pem: Vec<u8>,
}

impl Identity {
    /// Splits a PEM bundle into its certificate chain and its private key.
    /// Blocks with other tags are ignored.
    pub fn from_pem(contents: &[u8]) -> Result<Identity, IdentityError> {
        let blocks = pem::parse_many(contents)?;

        let certificates: Vec<&Pem> = blocks
            .iter()
            .filter(|block| block.tag() == CERTIFICATE_TAG)
            .collect();
        if certificates.is_empty() {
            return Err(IdentityError::NoCertificate);
        }

        let private_key = match blocks.iter().find(|block| is_private_key(block)) {
            Some(key) if is_encrypted(key) => return Err(IdentityError::EncryptedPrivateKey),
            Some(key) => key,
            None => return Err(IdentityError::NoPrivateKey),
        };

        Ok(Identity {
            certificate_pem: certificates
                .into_iter()
                .map(pem::encode)
                .collect::<String>()
                .into_bytes(),
            private_key_pem: pem::encode(private_key).into_bytes(),
        })
    }
}

fn is_private_key(block: &Pem) -> bool {
    block.tag() == ENCRYPTED_PRIVATE_KEY_TAG || PRIVATE_KEY_TAGS.contains(&block.tag())
}

// Legacy OpenSSL encryption marks the block with a Proc-Type header.
fn is_encrypted(block: &Pem) -> bool {
    block.tag() == ENCRYPTED_PRIVATE_KEY_TAG
        || block
            .headers()
            .get("Proc-Type")
            .is_some_and(|value| value.contains("ENCRYPTED"))
}

/// Reads the certificate file at `path` into a client identity. The
/// password is always empty.
#[instrument]
pub fn from_pem_file(path: &Path) -> Result<Identity, CertificateError> {
    let contents = fs::read(path).map_err(|source| CertificateError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let identity = Identity::from_pem(&contents).map_err(|source| CertificateError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("loaded certificate identity");
    Ok(identity)
}
