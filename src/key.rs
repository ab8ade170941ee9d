//! Private key loading from PEM credential files.

use crate::error::Error;
use rsa::{pkcs1::DecodeRsaPrivateKey, pkcs8::DecodePrivateKey, RsaPrivateKey};
use std::{fs, path::Path};

/// PEM tag of a PKCS#1 RSA private key.
const TAG_PKCS1: &str = "RSA PRIVATE KEY";

/// PEM tag of a PKCS#8 private key.
const TAG_PKCS8: &str = "PRIVATE KEY";

/// Load one PEM-encoded RSA private key from the credential file.
///
/// The key is owned by the caller for the duration of a single
/// escalation attempt and never cached; the `rsa` crate zeroizes the
/// private components on drop.  Key material must not appear in logs
/// or error messages.
pub fn load<P: AsRef<Path>>(path: P) -> Result<RsaPrivateKey, Error> {
    let data = fs::read(path).map_err(Error::KeyFileUnreadable)?;
    let block = pem::parse(&data).map_err(|_| Error::KeyFormatInvalid)?;

    match block.tag() {
        TAG_PKCS1 => RsaPrivateKey::from_pkcs1_der(block.contents())
            .map_err(|err| Error::KeyParseFailed(err.into())),
        TAG_PKCS8 => RsaPrivateKey::from_pkcs8_der(block.contents())
            .map_err(|err| Error::KeyParseFailed(err.into())),
        _ => Err(Error::KeyFormatInvalid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsa::traits::PublicKeyParts;
    use std::io::Write;

    const KEY_PKCS1: &str = include_str!("../tests/fixtures/rsa2048_pkcs1.pem");
    const KEY_PKCS8: &str = include_str!("../tests/fixtures/rsa2048_pkcs8.pem");

    fn write_temp(content: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn load_pkcs1() {
        let file = write_temp(KEY_PKCS1.as_bytes());
        let key = load(file.path()).unwrap();
        assert_eq!(key.size(), 256);
    }

    #[test]
    fn load_pkcs8() {
        let file = write_temp(KEY_PKCS8.as_bytes());
        let key = load(file.path()).unwrap();
        assert_eq!(key.size(), 256);
    }

    #[test]
    fn pkcs1_and_pkcs8_are_the_same_key() {
        let pkcs1 = load(write_temp(KEY_PKCS1.as_bytes()).path()).unwrap();
        let pkcs8 = load(write_temp(KEY_PKCS8.as_bytes()).path()).unwrap();
        assert_eq!(pkcs1.n(), pkcs8.n());
    }

    #[test]
    fn unreadable_path() {
        let err = load("/nonexistent/prsu-test-key.pem").unwrap_err();
        assert!(matches!(err, Error::KeyFileUnreadable(_)));
    }

    #[test]
    fn not_pem() {
        let file = write_temp(b"this is not a pem file");
        let err = load(file.path()).unwrap_err();
        assert!(matches!(err, Error::KeyFormatInvalid));
    }

    #[test]
    fn unknown_pem_tag() {
        let block = pem::Pem::new("CERTIFICATE", vec![0u8; 32]);
        let file = write_temp(pem::encode(&block).as_bytes());
        let err = load(file.path()).unwrap_err();
        assert!(matches!(err, Error::KeyFormatInvalid));
    }

    #[test]
    fn corrupt_der() {
        let block = pem::Pem::new(TAG_PKCS1, vec![0u8; 64]);
        let file = write_temp(pem::encode(&block).as_bytes());
        let err = load(file.path()).unwrap_err();
        assert!(matches!(err, Error::KeyParseFailed(_)));
    }
}
