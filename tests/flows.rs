use vericode::cipher::{Hasher, Mac, codes_match};
use vericode::config::{MAX_FILE_SIZE, Policy};
use vericode::secret::SecretKey;
use vericode::types::Salt;
use vericode::{Error, Verifier};

fn verifier() -> Verifier {
    Verifier::new(SecretKey::new(b"integration-key").unwrap(), Policy::default())
}

#[test]
fn empty_input_has_known_digest() {
    let digest = Hasher::digest(b"", Policy::default()).unwrap();
    assert_eq!(digest.to_hex(), "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855");
}

#[test]
fn derive_code_is_deterministic_and_salt_sensitive() {
    let mac = Mac::new(SecretKey::new(b"integration-key").unwrap());
    let digest = Hasher::digest(b"quarterly figures", Policy::default()).unwrap();
    let salt = Salt::parse("000102030405060708090a0b0c0d0e0f").unwrap();

    let first = mac.derive_hex(&digest.to_hex(), &salt.to_hex()).unwrap();
    let second = mac.derive_hex(&digest.to_hex(), &salt.to_hex()).unwrap();
    assert_eq!(first.verification_code(), second.verification_code());

    let other = mac.derive_hex(&digest.to_hex(), "0f0e0d0c0b0a09080706050403020100").unwrap();
    assert_ne!(first.verification_code(), other.verification_code());
}

#[test]
fn codes_match_properties() {
    assert!(codes_match("a1b2c3d4e5f60718", "a1b2c3d4e5f60718"));
    assert!(!codes_match("a1b2c3d4e5f60718", "a1b2c3d4e5f60719"));
    assert!(!codes_match("a1b2c3d4e5f60718", "a1b2c3d4e5f6071"));
}

#[tokio::test]
async fn sender_then_receiver_matches() {
    let verifier = verifier();
    let file = b"the file as it left the sender".to_vec();

    let record = verifier.generate("transfer.zip", &file[..]).await.unwrap();
    let outcome = verifier.verify("transfer.zip", &file[..], &record.verification_code, &record.salt).await.unwrap();

    assert!(outcome.matched);
    assert_eq!(outcome.sha256, record.sha256);
}

#[tokio::test]
async fn altered_byte_is_a_mismatch_not_an_error() {
    let verifier = verifier();
    let file = b"the file as it left the sender".to_vec();
    let record = verifier.generate("transfer.zip", &file[..]).await.unwrap();

    let mut received = file.clone();
    received[10] ^= 0x20;

    let outcome = verifier.verify("transfer.zip", &received[..], &record.verification_code, &record.salt).await.unwrap();
    assert!(!outcome.matched);
}

#[tokio::test]
async fn odd_length_salt_is_rejected() {
    let result = verifier().verify("transfer.zip", &b"data"[..], "0123456789abcdef", "0123456789abcdef0").await;
    assert!(matches!(result, Err(Error::InvalidSaltFormat(_))));
}

#[tokio::test]
async fn compare_identical_and_different_files() {
    let verifier = verifier();

    let same = verifier.compare_readers(("a.csv".into(), &b"1,2,3"[..]), ("b.csv".into(), &b"1,2,3"[..])).await.unwrap();
    assert!(same.matched);
    assert_eq!(same.file1.sha256, same.file2.sha256);

    let different = verifier.compare_readers(("a.csv".into(), &b"1,2,3"[..]), ("b.csv".into(), &b"1,2,4"[..])).await.unwrap();
    assert!(!different.matched);
}

#[tokio::test]
async fn ceiling_boundary() {
    let verifier = Verifier::new(SecretKey::new(b"integration-key").unwrap(), Policy::new(4096, false));

    let exact = vec![0u8; 4096];
    assert!(verifier.generate("exact.bin", &exact[..]).await.is_ok());

    let over = vec![0u8; 4097];
    let result = verifier.generate("over.bin", &over[..]).await;
    assert!(matches!(result, Err(Error::InputTooLarge { limit: 4096 })));
}

#[tokio::test]
async fn default_ceiling_is_fifty_mebibytes() {
    assert_eq!(verifier().policy().max_size, MAX_FILE_SIZE);
    assert_eq!(MAX_FILE_SIZE, 50 * 1024 * 1024);
}
