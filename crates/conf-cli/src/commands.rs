use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info_span;

use conf_cli::store;
use conf_model::{ItemId, ManifestId, ManifestItem, Owner, UserId};
use conf_search::find_by_scan;
use conf_session::{ConferenceBackend, ConferenceFlow, InMemoryBackend, StartOutcome};

use crate::cli::{
    Cli, ConfirmArgs, FinishArgs, ListArgs, ManifestArgs, ScanArgs, SearchArgs, ShowArgs,
};
use crate::summary::{print_item_card, print_manifest_list, print_session};

/// Store location and operator identity shared by every subcommand.
pub struct CliContext {
    pub store: PathBuf,
    pub operator: Owner,
}

impl CliContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let operator = Owner {
            user_id: UserId::new(&cli.user_id).context("invalid --user-id")?,
            user_name: cli.user_name.trim().to_string(),
        };
        Ok(Self {
            store: cli.store.clone(),
            operator,
        })
    }
}

fn open_flow(ctx: &CliContext, manifest: &str) -> Result<ConferenceFlow<InMemoryBackend>> {
    let id = ManifestId::new(manifest)?;
    let backend = store::load_store(&ctx.store)?;
    let flow = ConferenceFlow::open(backend, ctx.operator.clone(), &id)?;
    Ok(flow)
}

pub fn run_list(ctx: &CliContext, args: &ListArgs) -> Result<()> {
    let backend = store::load_store(&ctx.store)?;
    let summaries = backend.manifests_by_date(args.date)?;
    print_manifest_list(args.date, &summaries);
    Ok(())
}

pub fn run_show(ctx: &CliContext, args: &ShowArgs) -> Result<()> {
    let flow = open_flow(ctx, &args.manifest)?;
    print_session(flow.session());
    Ok(())
}

pub fn run_start(ctx: &CliContext, args: &ManifestArgs) -> Result<()> {
    let span = info_span!("start", manifest = %args.manifest);
    let _guard = span.enter();

    let mut flow = open_flow(ctx, &args.manifest)?;
    match flow.start()? {
        StartOutcome::Started(owner) => {
            println!("Conference started; lock held by {owner}.");
        }
        StartOutcome::AlreadyOwned(owner) => {
            println!("Conference is already held by {owner}.");
        }
        StartOutcome::NotFound => {}
    }
    print_session(flow.session());
    store::save_store(flow.into_backend(), &ctx.store)
}

pub fn run_confirm(ctx: &CliContext, args: &ConfirmArgs) -> Result<()> {
    let span = info_span!("confirm", manifest = %args.manifest, item = %args.item);
    let _guard = span.enter();

    let mut flow = open_flow(ctx, &args.manifest)?;
    let item = ItemId::new(&args.item)?;
    flow.confirm_item(&item, &args.quantity, args.note.as_deref())?;
    println!("Item {item} confirmed.");
    print_session(flow.session());
    store::save_store(flow.into_backend(), &ctx.store)
}

pub fn run_scan(ctx: &CliContext, args: &ScanArgs) -> Result<()> {
    let flow = open_flow(ctx, &args.manifest)?;
    let session = flow.session();
    let pending: Vec<ManifestItem> = session
        .own_pending()
        .iter()
        .chain(session.third_party_pending())
        .cloned()
        .collect();
    match find_by_scan(&pending, &args.code) {
        Some(item) => print_item_card(item),
        None => println!("No pending item matches {:?}.", args.code.trim()),
    }
    Ok(())
}

pub fn run_search(ctx: &CliContext, args: &SearchArgs) -> Result<()> {
    let mut flow = open_flow(ctx, &args.manifest)?;
    flow.set_query(&args.query);
    print_session(flow.session());
    Ok(())
}

pub fn run_finish(ctx: &CliContext, args: &FinishArgs) -> Result<()> {
    let span = info_span!("finish", manifest = %args.manifest);
    let _guard = span.enter();

    let mut flow = open_flow(ctx, &args.manifest)?;
    let payload = flow.finish(args.note.as_deref())?;
    match &payload.closing_note {
        Some(note) => println!("Conference finished. Closing note: {note}"),
        None => println!("Conference finished."),
    }
    print_session(flow.session());
    store::save_store(flow.into_backend(), &ctx.store)
}
