//! VolunteerPay Telegram Bot
//!
//! Main application entry point

use std::sync::Arc;
use teloxide::{prelude::*, types::Update};
use teloxide::dispatching::UpdateHandler;
use tracing::{error, info, warn};

use VolunteerPay::{
    config::Settings,
    utils::logging,
    database::{DatabaseService, SharedEventStore, create_pool, run_migrations},
    services::{ServiceFactory, WalletConnectorClient, SharedWalletConnector},
    state::{AppContext, StateStorage},
    middleware::log_update,
    handlers::{Command, handle_command, handle_callback_query, handle_message},
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard flushes the log file on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", VolunteerPay::info());

    info!("Connecting to database...");
    let db_pool = create_pool(&settings.database).await?;
    run_migrations(&db_pool).await?;
    let store: SharedEventStore = Arc::new(DatabaseService::new(db_pool));

    info!("Connecting to Redis...");
    let state_storage = StateStorage::new(settings.redis.clone()).await?;
    state_storage.test_connection().await?;

    info!("Initializing services...");
    let wallet: SharedWalletConnector = Arc::new(WalletConnectorClient::new(settings.wallet.clone())?);
    let mut services = ServiceFactory::new(store, wallet);
    services.load_challenge().await;

    let app = AppContext::new(settings.clone(), services, state_storage);
    let bot = Bot::new(&settings.bot.token);

    if let Err(e) = bot.set_my_commands(<Command as teloxide::utils::command::BotCommands>::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands");
    }

    let mut dispatcher = Dispatcher::builder(bot, create_handler())
        .dependencies(dptree::deps![app])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd.id);
        })
        .enable_ctrlc_handler()
        .build();

    info!("VolunteerPay bot is ready, starting polling...");
    dispatcher.dispatch().await;

    info!("VolunteerPay bot has been shut down.");
    Ok(())
}

/// Create the main update handler
fn create_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    dptree::entry()
        .inspect(|update: Update| log_update(&update))
        .branch(
            Update::filter_message()
                .branch(
                    dptree::entry()
                        .filter_command::<Command>()
                        .endpoint(handle_commands),
                )
                .branch(dptree::endpoint(handle_messages)),
        )
        .branch(Update::filter_callback_query().endpoint(handle_callbacks))
}

/// Handle bot commands
async fn handle_commands(bot: Bot, msg: Message, cmd: Command, app: AppContext) -> HandlerResult {
    if let Err(e) = handle_command(bot, msg, cmd, app).await {
        error!(error = %e, severity = %e.severity(), "Error handling command");
        return Err(e.into());
    }
    Ok(())
}

/// Handle regular messages
async fn handle_messages(bot: Bot, msg: Message, app: AppContext) -> HandlerResult {
    if let Err(e) = handle_message(bot, msg, app).await {
        error!(error = %e, severity = %e.severity(), "Error handling message");
        return Err(e.into());
    }
    Ok(())
}

/// Handle callback queries
async fn handle_callbacks(bot: Bot, query: CallbackQuery, app: AppContext) -> HandlerResult {
    let user_id = query.from.id.0 as i64;
    if let Err(e) = handle_callback_query(bot, query, app).await {
        error!(user_id = user_id, error = %e, severity = %e.severity(), "Error handling callback query");
        return Err(e.into());
    }
    Ok(())
}
