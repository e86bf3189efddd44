use std::sync::Arc;

use logger::TracingLogger;
use storefront_api::cart_service::RemoteCartServiceHttp;
use storefront_api::client::StorefrontClient;

use business::application::cart::clear_all::ClearCartUseCaseImpl;
use business::application::cart::recovery::CartRecovery;
use business::application::cart::refresh::RefreshCartUseCaseImpl;
use business::application::cart::remove_line::RemoveLineUseCaseImpl;
use business::application::cart::select::SelectLinesUseCaseImpl;
use business::application::cart::set_quantity::SetQuantityUseCaseImpl;
use business::domain::cart::store::CartStore;
use business::domain::cart::use_cases::clear_all::ClearCartUseCase;
use business::domain::cart::use_cases::refresh::RefreshCartUseCase;
use business::domain::cart::use_cases::remove_line::RemoveLineUseCase;
use business::domain::cart::use_cases::select::SelectLinesUseCase;
use business::domain::cart::use_cases::set_quantity::SetQuantityUseCase;

use crate::config::app_config::AppConfig;
use crate::console::confirmation::StdinConfirmation;
use crate::console::notifier::ConsoleNotifier;

pub struct DependencyContainer {
    pub store: Arc<CartStore>,
    pub refresh: Arc<dyn RefreshCartUseCase>,
    pub set_quantity: Arc<dyn SetQuantityUseCase>,
    pub remove_line: Arc<dyn RemoveLineUseCase>,
    pub clear_cart: Arc<dyn ClearCartUseCase>,
    pub select: Arc<dyn SelectLinesUseCase>,
}

impl DependencyContainer {
    pub fn new(config: &AppConfig, assume_yes: bool) -> anyhow::Result<Self> {
        let logger = Arc::new(TracingLogger);
        let store = Arc::new(CartStore::new());

        // Infrastructure adapters
        let client = StorefrontClient::new(
            config.api.base_url.clone(),
            config.api.token.clone(),
            config.api.timeout,
        )?;
        let remote = Arc::new(RemoteCartServiceHttp::new(client));
        let notifier = Arc::new(ConsoleNotifier);
        let confirmation = Arc::new(StdinConfirmation { assume_yes });

        // Cart use cases
        let refresh = Arc::new(RefreshCartUseCaseImpl {
            store: store.clone(),
            remote: remote.clone(),
            logger: logger.clone(),
        });
        let recovery = Arc::new(CartRecovery {
            policy: config.recovery,
            store: store.clone(),
            refresh: refresh.clone(),
            logger: logger.clone(),
        });
        let set_quantity = Arc::new(SetQuantityUseCaseImpl {
            store: store.clone(),
            remote: remote.clone(),
            notifier: notifier.clone(),
            recovery: recovery.clone(),
            logger: logger.clone(),
        });
        let remove_line = Arc::new(RemoveLineUseCaseImpl {
            store: store.clone(),
            remote: remote.clone(),
            confirmation: confirmation.clone(),
            notifier: notifier.clone(),
            recovery: recovery.clone(),
            logger: logger.clone(),
        });
        let clear_cart = Arc::new(ClearCartUseCaseImpl {
            store: store.clone(),
            remote,
            confirmation,
            notifier,
            recovery,
            logger: logger.clone(),
        });
        let select = Arc::new(SelectLinesUseCaseImpl {
            store: store.clone(),
            logger,
        });

        Ok(Self {
            store,
            refresh,
            set_quantity,
            remove_line,
            clear_cart,
            select,
        })
    }
}
