use anyhow::{Context, bail};
use checkout::{CheckoutRequest, SimulatedGateway};
use chrono::{NaiveDate, Utc};
use clap::Parser;
use core_types::{CallerId, ClientId, LeadId};
use engine::{
    AssignLeadForm, ConsoleEngine, EditCallerForm, NewCallerForm, NewClientForm, PaymentForm,
};
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use query::{
    ActivityQuery, CallerQuery, ClientQuery, Filter, IntegrationQuery, LeadQuery, SearchTerm,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use store::{CrmStore, InMemoryStore, SeedFeed};

mod cli;
mod render;

use cli::{Cli, Commands};

type Console = ConsoleEngine<InMemoryStore>;

/// The main entry point for the agency console.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = configuration::load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    let _log_guard = configuration::init_tracing(&config.logging)?;

    if let Some(seed) = &cli.seed {
        config.dashboard.seed_path = Some(seed.clone());
    }
    let feed = match &config.dashboard.seed_path {
        Some(path) => SeedFeed::from_path(path)?,
        None => SeedFeed::builtin()?,
    };
    let store = InMemoryStore::from_seed(feed)?;
    let gateway = Arc::new(SimulatedGateway::from_settings(&config.checkout));
    let today = cli.today.unwrap_or_else(|| Utc::now().date_naive());

    tracing::debug!(%today, "Console ready.");
    let engine = ConsoleEngine::new(store, config, gateway);
    let mut notifications = engine.subscribe();

    let result = run(&engine, cli.command, today).await;

    while let Ok(notification) = notifications.try_recv() {
        render::notification(&notification);
    }
    result
}

async fn run(engine: &Console, command: Commands, today: NaiveDate) -> anyhow::Result<()> {
    match command {
        Commands::Dashboard(args) => {
            let view = engine.dashboard(today).await;
            if args.json {
                let cards = serde_json::json!({
                    "today": view.today,
                    "overview": view.overview,
                    "clients": view.clients,
                    "callers": view.callers,
                    "leads": view.leads,
                    "integrations": view.integrations,
                    "health": view.health,
                });
                println!("{}", serde_json::to_string_pretty(&cards)?);
            } else {
                render::dashboard(&view, &engine.config().agency);
            }
        }
        Commands::Clients(args) => {
            let query = ClientQuery {
                search: SearchTerm::new(&args.search),
                status: args.status,
                payment_status: args.payment,
                service_type: args.service,
                plan_type: args.plan,
                priority: args.priority,
                renewal_month: args.renewal_month,
            };
            render::clients(&engine.client_view(&query, today).await);
        }
        Commands::Companies(args) => {
            let query = ClientQuery {
                search: SearchTerm::new(&args.search),
                status: args.status,
                ..ClientQuery::default()
            };
            render::companies(&engine.company_view(&query).await);
        }
        Commands::Callers(args) => {
            let query = CallerQuery {
                client: client_filter(engine, args.client.as_deref()).await?,
                search: SearchTerm::new(&args.search),
                status: args.status,
            };
            render::callers(&engine.caller_view(&query).await);
        }
        Commands::Leads(args) => {
            let assigned_caller = match args.caller.as_deref() {
                Some(needle) => Filter::Only(caller_id(engine, needle).await?),
                None => Filter::All,
            };
            let query = LeadQuery {
                client: client_filter(engine, args.client.as_deref()).await?,
                search: SearchTerm::new(&args.search),
                status: args.status,
                source: args.source,
                assigned_caller,
            };
            render::leads(&engine.lead_view(&query).await);
        }
        Commands::AddClient(args) => {
            let form = NewClientForm {
                client_name: args.client_name,
                business_name: args.business_name,
                email: args.email,
                phone: args.phone,
                status: args.status,
                service_type: args.service,
                plan_type: args.plan,
                priority: args.priority,
                payment_status: args.payment,
                renewal_date: args.renewal_date,
                total_bill_amount: args.bill,
            };
            let outcome = with_spinner("Adding client...", engine.add_client(form)).await?;
            let query = ClientQuery::new().search(&outcome.record.client_name);
            render::clients(&engine.client_view(&query, today).await);
        }
        Commands::AddCaller(args) => {
            let form = NewCallerForm {
                name: args.name,
                email: args.email,
                phone: args.phone,
                client: Some(client_id(engine, &args.client).await?),
                status: args.status,
                daily_target: args.daily_target,
            };
            let outcome = with_spinner("Adding caller...", engine.add_caller(form)).await?;
            let query = CallerQuery::for_client(outcome.record.client_id);
            render::callers(&engine.caller_view(&query).await);
        }
        Commands::EditCaller(args) => {
            let id = caller_id(engine, &args.caller).await?;
            let current = engine.store().read().await.caller(id)?.clone();
            let mut form = EditCallerForm::from_caller(&current);
            if let Some(name) = args.name {
                form.name = name;
            }
            if let Some(email) = args.email {
                form.email = email;
            }
            if let Some(phone) = args.phone {
                form.phone = phone;
            }
            if let Some(status) = args.status {
                form.status = status;
            }
            if args.daily_target.is_some() {
                form.daily_target = args.daily_target;
            }
            let outcome = with_spinner("Saving caller...", engine.edit_caller(id, form)).await?;
            let query = CallerQuery::for_client(outcome.record.client_id);
            render::callers(&engine.caller_view(&query).await);
        }
        Commands::DeleteCaller(args) => {
            let id = caller_id(engine, &args.caller).await?;
            let outcome = with_spinner("Removing caller...", engine.delete_caller(id)).await?;
            let query = CallerQuery::for_client(outcome.record.client_id);
            render::callers(&engine.caller_view(&query).await);
        }
        Commands::AssignLead(args) => {
            let caller = caller_id(engine, &args.caller).await?;
            let mut lead_ids = Vec::with_capacity(args.leads.len());
            for needle in &args.leads {
                lead_ids.push(lead_id(engine, needle).await?);
            }

            let assignments = lead_ids.iter().map(|&lead| {
                let form = AssignLeadForm {
                    caller: Some(caller),
                    priority: args.priority,
                    notes: args.notes.clone(),
                };
                engine.assign_lead(lead, form)
            });
            let results = with_spinner("Assigning leads...", join_all(assignments)).await;

            let failed = results.iter().filter(|r| r.is_err()).count();
            let query = LeadQuery {
                assigned_caller: Filter::Only(caller),
                ..LeadQuery::default()
            };
            render::leads(&engine.lead_view(&query).await);
            if failed > 0 {
                bail!("{failed} of {} assignments failed", results.len());
            }
        }
        Commands::LeadStatus(args) => {
            let id = lead_id(engine, &args.lead).await?;
            let outcome =
                with_spinner("Updating lead...", engine.update_lead_status(id, args.status)).await?;
            let query = LeadQuery {
                client: Filter::Only(outcome.record.client_id),
                ..LeadQuery::default()
            };
            render::leads(&engine.lead_view(&query).await);
        }
        Commands::Pay(args) => {
            let id = client_id(engine, &args.client).await?;
            if args.dry_run {
                let store = engine.store();
                let store = store.read().await;
                let request =
                    CheckoutRequest::new(&engine.config().checkout, args.amount, store.client(id)?)?;
                println!("{}", request.to_options_json()?);
                return Ok(());
            }

            let form = PaymentForm { amount: args.amount };
            let outcome =
                with_spinner("Processing payment...", engine.collect_payment(id, form, today)).await?;
            let receipt = &outcome.record;
            println!(
                "Payment {} recorded. {} now {} with {} outstanding.",
                receipt.payment_id,
                receipt.client.business_name,
                receipt.client.payment_status,
                receipt.client.pending_amount()
            );
        }
        Commands::Integrations(args) => {
            let query = IntegrationQuery {
                client: client_filter(engine, args.client.as_deref()).await?,
                status: args.status,
                enabled: args.enabled,
            };
            render::integrations(&engine.integration_view(&query).await);
        }
        Commands::ToggleIntegration(args) => {
            let client = client_id(engine, &args.client).await?;
            let id = {
                let store = engine.store();
                let store = store.read().await;
                let integration = store
                    .integrations_for(client)
                    .into_iter()
                    .find(|i| i.name.eq_ignore_ascii_case(args.name.trim()));
                match integration {
                    Some(integration) => integration.id,
                    None => bail!("No integration named '{}' for this client", args.name),
                }
            };
            with_spinner("Updating integration...", engine.toggle_integration(id)).await?;
            let query = IntegrationQuery {
                client: Filter::Only(client),
                ..IntegrationQuery::default()
            };
            render::integrations(&engine.integration_view(&query).await);
        }
        Commands::Health => render::health(&engine.health_view().await),
        Commands::Activity(args) => {
            let query = ActivityQuery {
                kind: args.kind,
                client: client_filter(engine, args.client.as_deref()).await?,
                search: SearchTerm::new(&args.search),
            };
            let view = engine.activity_view(&query).await;
            if args.json {
                let limit = args.limit.unwrap_or(view.entries.len());
                for entry in view.entries.iter().take(limit) {
                    println!("{}", serde_json::to_string(entry)?);
                }
            } else {
                render::activity(&view, args.limit);
            }
        }
    }
    Ok(())
}

/// Shows a spinner on stderr while `future` runs.
async fn with_spinner<F: Future>(message: &str, future: F) -> F::Output {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));

    let output = future.await;
    spinner.finish_and_clear();
    output
}

async fn client_id(engine: &Console, needle: &str) -> anyhow::Result<ClientId> {
    Ok(engine.store().read().await.find_client(needle)?.id)
}

async fn client_filter(engine: &Console, needle: Option<&str>) -> anyhow::Result<Filter<ClientId>> {
    Ok(match needle {
        Some(needle) => Filter::Only(client_id(engine, needle).await?),
        None => Filter::All,
    })
}

async fn caller_id(engine: &Console, needle: &str) -> anyhow::Result<CallerId> {
    Ok(engine.store().read().await.find_caller(needle)?.id)
}

async fn lead_id(engine: &Console, needle: &str) -> anyhow::Result<LeadId> {
    Ok(engine.store().read().await.find_lead(needle)?.id)
}
