use proptest::prelude::*;
use serde_json::json;

use relay_envelope::{Codec, PrivateKey, Seal, SymmetricKey};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn signed_only_roundtrip(msg in ".*") {
        let sender = Codec::new(PrivateKey::new());
        let receiver = Codec::new(PrivateKey::new());

        let bytes = sender.encode(&json!({ "msg": msg }), Seal::None).unwrap();
        let decoded = receiver.decode(&bytes).unwrap();
        prop_assert_eq!(decoded.data, json!({ "msg": msg }));
        prop_assert_eq!(&decoded.public_key, sender.public_key());
    }

    #[test]
    fn asym_roundtrip(
        seed_sender in prop::array::uniform32(any::<u8>()),
        seed_receiver in prop::array::uniform32(any::<u8>()),
        msg in ".*"
    ) {
        // Not all 32-byte arrays are valid private keys; skip the rest.
        if let (Ok(sk_sender), Ok(sk_receiver)) = (
            PrivateKey::from_bytes(&seed_sender),
            PrivateKey::from_bytes(&seed_receiver),
        ) {
            let sender = Codec::new(sk_sender);
            let receiver = Codec::new(sk_receiver);

            let bytes = sender
                .encode(&json!({ "msg": msg }), Seal::Recipient(receiver.public_key().clone()))
                .unwrap();
            let decoded = receiver.decode(&bytes).unwrap();
            prop_assert_eq!(decoded.data, json!({ "msg": msg }));
            prop_assert_eq!(&decoded.public_key, sender.public_key());
        }
    }

    #[test]
    fn sym_roundtrip(key in prop::array::uniform32(any::<u8>()), msg in ".*") {
        let shared = SymmetricKey::new(&key);
        let sender = Codec::new(PrivateKey::new());
        let receiver = Codec::new(PrivateKey::new());
        receiver.add_symmetric_key(shared.clone());

        let bytes = sender
            .encode(&json!({ "msg": msg }), Seal::SharedKey(shared))
            .unwrap();
        let decoded = receiver.decode(&bytes).unwrap();
        prop_assert_eq!(decoded.data, json!({ "msg": msg }));
    }

    #[test]
    fn non_recipient_sees_nothing(msg in ".*") {
        let sender = Codec::new(PrivateKey::new());
        let receiver = Codec::new(PrivateKey::new());
        let stranger = Codec::new(PrivateKey::new());

        let bytes = sender
            .encode(&json!({ "msg": msg }), Seal::Recipient(receiver.public_key().clone()))
            .unwrap();
        prop_assert!(stranger.decode(&bytes).is_none());
    }

    #[test]
    fn tampered_encrypted_envelope_never_decodes(
        msg in ".*",
        flip in any::<prop::sample::Index>()
    ) {
        let sender = Codec::new(PrivateKey::new());
        let receiver = Codec::new(PrivateKey::new());

        let mut bytes = sender
            .encode(&json!({ "msg": msg }), Seal::Recipient(receiver.public_key().clone()))
            .unwrap();
        let i = flip.index(bytes.len());
        bytes[i] ^= 0x01;

        prop_assert!(receiver.decode(&bytes).is_none());
    }

    #[test]
    fn arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let codec = Codec::new(PrivateKey::new());
        // Whatever the relay hands us, decode returns at most nothing.
        let _ = codec.decode(&bytes);
    }
}
