//! Typed wrappers for frequently used daemon methods.

use bitcoin::{BlockHash, Txid};

use crate::error::RpcError;
use crate::rpc::types::ChainInfo;

use super::client::Client;
use super::response::DividenddResponse;

impl Client {
    /// `getblockheader <hash>` (verbose form).
    pub async fn get_block_header(&self, hash: &BlockHash) -> Result<DividenddResponse, RpcError> {
        self.request(
            "getblockheader",
            vec![serde_json::json!(hash.to_string()), serde_json::json!(true)],
        )
        .await
    }

    /// `getrawtransaction <txid> <verbose>`.
    pub async fn get_raw_transaction(
        &self,
        txid: &Txid,
        verbose: bool,
    ) -> Result<DividenddResponse, RpcError> {
        self.request(
            "getrawtransaction",
            vec![serde_json::json!(txid.to_string()), serde_json::json!(verbose)],
        )
        .await
    }

    /// Wallet balance in DVD as the daemon reports it. Use a wallet view to
    /// target a specific wallet.
    pub async fn get_balance(&self) -> Result<DividenddResponse, RpcError> {
        self.request("getbalance", Vec::new()).await
    }

    pub async fn get_block_count(&self) -> Result<u64, RpcError> {
        self.request("getblockcount", Vec::new()).await?.decode()
    }

    pub async fn get_blockchain_info(&self) -> Result<ChainInfo, RpcError> {
        self.request("getblockchaininfo", Vec::new()).await?.decode()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use reqwest::StatusCode;

    use super::*;
    use crate::rpc::mock::MockTransport;
    use crate::test_util::*;

    #[tokio::test]
    async fn get_block_header_sends_hash_and_verbose_flag() {
        let (status, body) = ok_block_header();
        let (client, transport) =
            mock_client(MockTransport::builder().with_response(status, body).build());

        let hash = BlockHash::from_str(GENESIS_HASH).expect("static hash");
        let response = client.get_block_header(&hash).await.expect("header");
        assert_eq!(response.get_key("hash"), Some(&serde_json::json!(GENESIS_HASH)));

        let sent = transport.last_body();
        assert_eq!(sent["method"], "getblockheader");
        assert_eq!(sent["params"], serde_json::json!([GENESIS_HASH, true]));
    }

    #[tokio::test]
    async fn get_raw_transaction_not_found_is_daemon_error() {
        let (client, transport) = mock_client(
            MockTransport::builder()
                .with_response(StatusCode::INTERNAL_SERVER_ERROR, RAW_TX_ERROR_BODY)
                .build(),
        );

        let txid = Txid::from_str(GENESIS_COINBASE_TXID).expect("static txid");
        let err = client
            .get_raw_transaction(&txid, true)
            .await
            .expect_err("daemon must reject");
        assert!(err.is_daemon());
        assert_eq!(err.code(), -5);
        assert_eq!(
            transport.last_body()["params"],
            serde_json::json!([GENESIS_COINBASE_TXID, true])
        );
    }

    #[tokio::test]
    async fn decoded_helpers() {
        let (client, _) = mock_client(
            MockTransport::builder()
                .with_response(StatusCode::OK, r#"{"result":812345,"error":null,"id":null}"#)
                .with_response(
                    StatusCode::OK,
                    serde_json::json!({
                        "result": {
                            "chain": "main",
                            "blocks": 812345,
                            "headers": 812345,
                            "bestblockhash": GENESIS_HASH,
                            "pruned": false,
                            "verificationprogress": 0.9999
                        },
                        "error": null,
                        "id": null
                    })
                    .to_string(),
                )
                .with_response(StatusCode::OK, r#"{"result":"many","error":null,"id":null}"#)
                .build(),
        );

        assert_eq!(client.get_block_count().await.expect("count"), 812345);
        let info = client.get_blockchain_info().await.expect("info");
        assert_eq!(info.chain, "main");
        assert_eq!(info.best_block_hash.to_string(), GENESIS_HASH);

        let err = client.get_block_count().await.expect_err("not a number");
        assert_eq!(err.client_kind(), Some(crate::error::ClientErrorKind::Decode));
    }
}
