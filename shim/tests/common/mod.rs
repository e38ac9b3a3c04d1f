//! Shared helpers for shim integration tests.
//!
//! `KvChaincode` is a minimal key/value chaincode whose functions map
//! one-to-one onto stub operations, so tests can drive the ledger through
//! real chaincode entry points.

#![allow(dead_code)]

use ledgermock_shim::MockStub;
use ledgermock_stubapi::{
    Chaincode, ChaincodeError, ChaincodeResult, ChaincodeStub, IdentityAttributes, StubConfig,
};

pub struct KvChaincode;

fn arg<'a>(args: &'a [String], i: usize) -> ChaincodeResult<&'a str> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| ChaincodeError::Argument(format!("missing argument {}", i)))
}

impl Chaincode for KvChaincode {
    fn init(
        &mut self,
        _stub: &mut dyn ChaincodeStub,
        _function: &str,
        _args: &[String],
    ) -> ChaincodeResult<Vec<u8>> {
        Ok(Vec::new())
    }

    fn invoke(
        &mut self,
        stub: &mut dyn ChaincodeStub,
        function: &str,
        args: &[String],
    ) -> ChaincodeResult<Vec<u8>> {
        match function {
            "put" => {
                stub.put_state(arg(args, 0)?, arg(args, 1)?.as_bytes())?;
                Ok(Vec::new())
            }
            "del" => {
                stub.del_state(arg(args, 0)?)?;
                Ok(Vec::new())
            }
            "put_then_fail" => {
                stub.put_state(arg(args, 0)?, arg(args, 1)?.as_bytes())?;
                Err(ChaincodeError::Argument("failed after writing".into()))
            }
            "tx_id" => Ok(stub.tx_id().unwrap_or_default().as_bytes().to_vec()),
            "call_peer" => {
                let peer = arg(args, 0)?.to_owned();
                stub.invoke_chaincode(&peer, &args[1..])
            }
            other => Err(ChaincodeError::UnknownFunction(other.to_owned())),
        }
    }

    fn query(
        &mut self,
        stub: &mut dyn ChaincodeStub,
        function: &str,
        args: &[String],
    ) -> ChaincodeResult<Vec<u8>> {
        match function {
            "get" => Ok(stub.get_state(arg(args, 0)?)?.unwrap_or_default()),
            "range" => {
                let rendered: Vec<String> = stub
                    .range_query_state(arg(args, 0)?, arg(args, 1)?)?
                    .map(|(k, v)| format!("{}={}", k, String::from_utf8_lossy(&v)))
                    .collect();
                Ok(rendered.join(";").into_bytes())
            }
            "query_peer" => {
                let peer = arg(args, 0)?.to_owned();
                stub.query_chaincode(&peer, &args[1..])
            }
            other => Err(ChaincodeError::UnknownFunction(other.to_owned())),
        }
    }
}

pub fn args(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn kv_stub(name: &str) -> MockStub {
    MockStub::new(name, KvChaincode, IdentityAttributes::new())
}

pub fn strict_kv_stub(name: &str) -> MockStub {
    MockStub::with_config(name, KvChaincode, IdentityAttributes::new(), StubConfig::strict())
}
