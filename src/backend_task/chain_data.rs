use crate::backend_task::{BackendTaskSuccessResult, TaskError};
use crate::context::AppContext;
use crate::model::query::QueryTicket;
use std::sync::Arc;

/// Reads of the fund account. Each carries the ticket of the query slot that asked.
#[derive(Debug, Clone, PartialEq)]
pub enum ChainDataTask {
    FetchNativeBalance { ticket: QueryTicket },
    FetchNfts { ticket: QueryTicket },
}

impl AppContext {
    pub async fn run_chain_data_task(
        self: &Arc<Self>,
        task: ChainDataTask,
    ) -> Result<BackendTaskSuccessResult, TaskError> {
        let address = self.fund_address();
        let chain = self.chain();
        match task {
            ChainDataTask::FetchNativeBalance { ticket } => {
                match self.indexer.get_native_balance(&address, chain).await {
                    Ok(balance) => {
                        tracing::debug!(%address, %balance, "fetched fund balance");
                        Ok(BackendTaskSuccessResult::NativeBalance { ticket, balance })
                    }
                    Err(error) => {
                        tracing::warn!(%address, %error, "failed to fetch fund balance");
                        Err(TaskError::NativeBalance { ticket, error })
                    }
                }
            }
            ChainDataTask::FetchNfts { ticket } => {
                match self.indexer.get_nfts(&address, chain).await {
                    Ok(page) => {
                        tracing::debug!(%address, total = page.total(), "fetched fund NFTs");
                        Ok(BackendTaskSuccessResult::Nfts { ticket, page })
                    }
                    Err(error) => {
                        tracing::warn!(%address, %error, "failed to fetch fund NFTs");
                        Err(TaskError::Nfts { ticket, error })
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend_task::BackendTask;
    use crate::context::tests::test_context;
    use crate::indexer::IndexerError;
    use crate::model::nft::{Nft, NftPage};
    use crate::model::query::QuerySlot;
    use crate::utils::test_providers::{MockIndexer, MockWallet};

    fn page() -> NftPage {
        NftPage {
            total: Some(1),
            result: vec![Nft {
                token_id: "23000250".to_string(),
                name: Some("Art Blocks".to_string()),
                metadata: None,
            }],
        }
    }

    #[tokio::test]
    async fn test_balance_is_fetched_without_a_session() {
        let context = test_context(
            MockIndexer::new(1_500_000_000_000_000_000, page()),
            MockWallet::approving(),
        );
        let ticket = QuerySlot::<()>::default().start();

        let result = context
            .run_backend_task(BackendTask::ChainDataTask(
                ChainDataTask::FetchNativeBalance { ticket },
            ))
            .await
            .unwrap();

        let BackendTaskSuccessResult::NativeBalance { ticket: got, balance } = result else {
            panic!("expected NativeBalance, got {:?}", result);
        };
        assert_eq!(got, ticket);
        assert_eq!(balance.to_string(), "1.5 ETH");
        assert!(!context.wallet.is_authenticated());
    }

    #[tokio::test]
    async fn test_nfts_are_returned_with_their_ticket() {
        let context = test_context(MockIndexer::new(0, page()), MockWallet::approving());
        let ticket = QuerySlot::<()>::default().start();

        let result = context
            .run_backend_task(BackendTask::ChainDataTask(ChainDataTask::FetchNfts {
                ticket,
            }))
            .await;

        assert_eq!(
            result,
            Ok(BackendTaskSuccessResult::Nfts {
                ticket,
                page: page()
            })
        );
    }

    #[tokio::test]
    async fn test_indexer_failure_keeps_ticket() {
        let error = IndexerError::Status {
            status: 401,
            body: "invalid key".to_string(),
        };
        let context = test_context(MockIndexer::failing(error.clone()), MockWallet::approving());
        let ticket = QuerySlot::<()>::default().start();

        let result = context
            .run_backend_task(BackendTask::ChainDataTask(ChainDataTask::FetchNfts {
                ticket,
            }))
            .await;

        assert_eq!(result, Err(TaskError::Nfts { ticket, error }));
    }
}
