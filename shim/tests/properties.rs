//! Property tests through the mock stub.

mod common;

use ledgermock_stubapi::ChaincodeStub;
use proptest::prelude::*;

use common::*;

fn record() -> impl Strategy<Value = serde_json::Value> {
    (
        "[a-z0-9]{1,8}",
        "[A-Za-z ]{0,16}",
        any::<i64>(),
        prop::collection::vec(any::<u32>(), 0..4),
    )
        .prop_map(|(id, status, amount, history)| {
            serde_json::json!({
                "id": id,
                "status": status,
                "requestedAmount": amount,
                "history": history,
            })
        })
}

proptest! {
    #[test]
    fn prop_put_get_round_trip(key in "[a-z][a-z0-9]{0,31}", record in record()) {
        let bytes = serde_json::to_vec(&record).unwrap();

        let mut direct = kv_stub("kv");
        direct.put_state(&key, &bytes).unwrap();
        prop_assert_eq!(direct.get_state(&key).unwrap(), Some(bytes.clone()));

        // Same bytes back when written through a chaincode invocation
        let text = String::from_utf8(bytes.clone()).unwrap();
        let mut invoked = kv_stub("kv");
        invoked.mock_invoke("tx0", "put", &[key.clone(), text]).unwrap();
        prop_assert_eq!(invoked.mock_query("get", &[key]).unwrap(), bytes);
    }

    #[test]
    fn prop_range_in_transaction_is_ordered(
        committed in prop::collection::vec("[a-z]{1,6}", 0..20),
        pending in prop::collection::vec("[a-z]{1,6}", 0..20),
    ) {
        let mut stub = kv_stub("kv");
        for k in &committed {
            stub.put_state(k, b"c").unwrap();
        }

        stub.mock_transaction_start("tx1").unwrap();
        for k in &pending {
            stub.put_state(k, b"p").unwrap();
        }
        let inside: Vec<String> = stub.range_query_state("", "").unwrap().map(|(k, _)| k).collect();
        stub.mock_transaction_end("tx1").unwrap();
        let after: Vec<String> = stub.range_query_state("", "").unwrap().map(|(k, _)| k).collect();

        prop_assert!(inside.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(inside, after);
    }
}
