use async_trait::async_trait;
use collectooor_fund::app::AppState;
use collectooor_fund::config::Config;
use collectooor_fund::context::AppContext;
use collectooor_fund::indexer::{ChainDataReader, IndexerError};
use collectooor_fund::model::address::Address;
use collectooor_fund::model::amount::Amount;
use collectooor_fund::model::chain::Chain;
use collectooor_fund::model::nft::NftPage;
use collectooor_fund::wallet_provider::{TransactionParams, WalletError, WalletProvider};
use egui_kittest::Harness;
use egui_kittest::kittest::Queryable;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const ACCOUNT: &str = "0x1111111111111111111111111111111111111111";
pub const TX_HASH: &str = "0x5c504ed432cb51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060";

#[derive(Debug, Default)]
pub struct TestWallet {
    pub sent: Mutex<Vec<TransactionParams>>,
}

#[async_trait]
impl WalletProvider for TestWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        Ok(vec![ACCOUNT.parse().unwrap()])
    }

    async fn send_transaction(&self, tx: &TransactionParams) -> Result<String, WalletError> {
        self.sent.lock().unwrap().push(tx.clone());
        Ok(TX_HASH.to_string())
    }
}

#[derive(Debug)]
pub struct TestIndexer {
    pub balance: Result<Amount, IndexerError>,
    pub nfts: Result<NftPage, IndexerError>,
}

impl TestIndexer {
    pub fn with_collection() -> Self {
        let nfts = serde_json::from_value(serde_json::json!({
            "total": 2,
            "result": [
                {
                    "token_id": "23000250",
                    "name": "Art Blocks",
                    "metadata": "{\"name\": \"Fidenza #250\", \"tokenID\": \"78000250\"}"
                },
                {
                    "token_id": "7",
                    "name": "Art Blocks",
                    "metadata": "not json"
                },
                {
                    "token_id": "1",
                    "name": "Other Collection",
                    "metadata": "{\"name\": \"Hidden\"}"
                }
            ]
        }))
        .unwrap();
        Self {
            balance: Ok(Amount::eth(1_500_000_000_000_000_000)),
            nfts: Ok(nfts),
        }
    }

    pub fn failing() -> Self {
        let error = IndexerError::Status {
            status: 500,
            body: "boom".to_string(),
        };
        Self {
            balance: Err(error.clone()),
            nfts: Err(error),
        }
    }
}

#[async_trait]
impl ChainDataReader for TestIndexer {
    async fn get_native_balance(
        &self,
        _address: &Address,
        _chain: Chain,
    ) -> Result<Amount, IndexerError> {
        self.balance.clone()
    }

    async fn get_nfts(&self, _address: &Address, _chain: Chain) -> Result<NftPage, IndexerError> {
        self.nfts.clone()
    }
}

/// Drives the real [AppState] against in-memory providers.
pub struct FundHarness {
    pub kittest: Harness<'static, AppState>,
    pub wallet: Arc<TestWallet>,
    runtime: tokio::runtime::Runtime,
}

impl FundHarness {
    pub fn new(indexer: TestIndexer) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("error,collectooor_fund=debug")
            .with_test_writer()
            .try_init();

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .expect("Failed to create Tokio runtime");
        let _guard = runtime.enter();

        let wallet = Arc::new(TestWallet::default());
        let config = Config::from_vars([("INDEXER_API_KEY".to_string(), "test".to_string())])
            .expect("test config");
        let app_context = AppContext::with_providers(config, Arc::new(indexer), wallet.clone());

        let mut kittest = Harness::builder()
            .with_size(egui::vec2(1000.0, 700.0))
            .build_eframe(move |cc| {
                AppState::new(cc.egui_ctx.clone(), app_context).with_animations(false)
            });
        kittest.step();

        Self {
            kittest,
            wallet,
            runtime,
        }
    }

    pub fn step(&mut self) {
        let _guard = self.runtime.enter();
        self.kittest.step();
    }

    /// Steps frames until `condition` holds; backend tasks finish on other threads.
    pub fn step_until(&mut self, what: &str, condition: impl Fn(&Harness<'static, AppState>) -> bool) {
        for _ in 0..300 {
            self.step();
            if condition(&self.kittest) {
                return;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("timed out waiting for {}", what);
    }

    pub fn wait_for_label(&mut self, label: &str) {
        self.step_until(label, |h| h.query_by_label(label).is_some());
    }

    pub fn click(&mut self, label: &str) {
        self.kittest.get_by_label(label).click();
        self.step();
    }
}
