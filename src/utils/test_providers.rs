//! In-memory wallet and indexer used by unit tests, plus a canned HTTP server for the
//! real clients.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Semaphore;

use crate::indexer::{ChainDataReader, IndexerError};
use crate::model::address::Address;
use crate::model::amount::Amount;
use crate::model::chain::Chain;
use crate::model::nft::NftPage;
use crate::wallet_provider::{TransactionParams, WalletError, WalletProvider};

pub fn account() -> Address {
    "0x1111111111111111111111111111111111111111".parse().unwrap()
}

pub fn fund_address() -> Address {
    "0x2cab92c1e9d2a701ca0411b0ff35a0907ca31f7f".parse().unwrap()
}

#[derive(Debug)]
pub struct MockWallet {
    accounts: Result<Vec<Address>, WalletError>,
    send_error: Option<WalletError>,
    gate: Option<Semaphore>,
    sent: Mutex<Vec<TransactionParams>>,
}

impl MockWallet {
    pub const TX_HASH: &'static str =
        "0x5c504ed432cb51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060";

    pub fn approving() -> Self {
        Self::with_accounts(vec![account()])
    }

    pub fn with_accounts(accounts: Vec<Address>) -> Self {
        Self {
            accounts: Ok(accounts),
            send_error: None,
            gate: None,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting_connect() -> Self {
        Self {
            accounts: Err(WalletError::UserRejected),
            ..Self::approving()
        }
    }

    /// `send_transaction` waits until [MockWallet::release] is called.
    pub fn gated() -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Self::approving()
        }
    }

    pub fn failing_send(mut self, error: WalletError) -> Self {
        self.send_error = Some(error);
        self
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    pub fn sent_transactions(&self) -> Vec<TransactionParams> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl WalletProvider for MockWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        self.accounts.clone()
    }

    async fn send_transaction(&self, tx: &TransactionParams) -> Result<String, WalletError> {
        self.sent.lock().unwrap().push(tx.clone());
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
        match &self.send_error {
            Some(error) => Err(error.clone()),
            None => Ok(Self::TX_HASH.to_string()),
        }
    }
}

#[derive(Debug)]
pub struct MockIndexer {
    balance: Result<Amount, IndexerError>,
    nfts: Result<NftPage, IndexerError>,
    balance_calls: AtomicUsize,
    nft_calls: AtomicUsize,
}

impl MockIndexer {
    pub fn new(balance_wei: u128, nfts: NftPage) -> Self {
        Self {
            balance: Ok(Amount::eth(balance_wei)),
            nfts: Ok(nfts),
            balance_calls: AtomicUsize::new(0),
            nft_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: IndexerError) -> Self {
        Self {
            balance: Err(error.clone()),
            nfts: Err(error),
            ..Self::new(0, NftPage::default())
        }
    }

    pub fn balance_calls(&self) -> usize {
        self.balance_calls.load(Ordering::SeqCst)
    }

    pub fn nft_calls(&self) -> usize {
        self.nft_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChainDataReader for MockIndexer {
    async fn get_native_balance(
        &self,
        _address: &Address,
        _chain: Chain,
    ) -> Result<Amount, IndexerError> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        self.balance.clone()
    }

    async fn get_nfts(&self, _address: &Address, _chain: Chain) -> Result<NftPage, IndexerError> {
        self.nft_calls.fetch_add(1, Ordering::SeqCst);
        self.nfts.clone()
    }
}

/// One request as received by [StubServer].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// e.g. `GET /api/v2/0x.../balance?chain=ropsten HTTP/1.1`
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn json_body(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// HTTP/1.1 server on a local port that answers each connection with the next
/// canned `(status, body)` pair and records what it received.
pub struct StubServer {
    url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubServer {
    pub async fn start(responses: Vec<(u16, &'static str)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = requests.clone();
        tokio::spawn(async move {
            for (status, body) in responses {
                let Ok((mut stream, _)) = listener.accept().await else {
                    return;
                };
                let request = read_request(&mut stream).await;
                recorded.lock().unwrap().push(request);

                let response = format!(
                    "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        Self { url, requests }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn read_request(stream: &mut TcpStream) -> RecordedRequest {
    let mut data = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        if let Some(position) = data.windows(4).position(|window| window == b"\r\n\r\n") {
            break position + 4;
        }
        let read = stream.read(&mut chunk).await.unwrap();
        assert!(read > 0, "connection closed before the request headers ended");
        data.extend_from_slice(&chunk[..read]);
    };

    let head = String::from_utf8_lossy(&data[..header_end]).to_string();
    let mut lines = head.split("\r\n").filter(|line| !line.is_empty());
    let request_line = lines.next().unwrap_or_default().to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.parse::<usize>().ok())
        .unwrap_or(0);
    while data.len() < header_end + content_length {
        let read = stream.read(&mut chunk).await.unwrap();
        assert!(read > 0, "connection closed before the request body ended");
        data.extend_from_slice(&chunk[..read]);
    }

    RecordedRequest {
        request_line,
        headers,
        body: String::from_utf8_lossy(&data[header_end..header_end + content_length]).to_string(),
    }
}

/// A local URL nothing listens on.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    url
}
