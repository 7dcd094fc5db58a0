use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, anyhow, bail};
use chrono::Utc;
use explorer_cli::{
    Osc52Clipboard, PrintFallback, build_location, load_config, resolve_config_path, save_theme,
};
use explorer_core::{
    CopyOutcome, ExplorerConfig, ExplorerSession, LoadError, Theme, copy_with_fallback,
    load_dataset, load_dataset_from_reader,
};
use explorer_model::{Dataset, Setting};
use explorer_render::{PageLayout, PageOptions, render_load_error, render_page};
use tracing::{debug, info, info_span};

use crate::cli::{
    LinkArgs, ListArgs, RenderArgs, SettingArgs, ThemeAction, ThemeArgs, ThemeChoice, ViewArgs,
};
use crate::summary::{
    facets_table, selected_version, setting_table, settings_table, shortcuts_table,
};

pub fn run_list(config: Option<&Path>, args: &ListArgs) -> Result<()> {
    let session = open_session(config, &args.view)?;
    println!("{}", settings_table(&session, args.limit));
    println!("{}", session.summary());
    Ok(())
}

pub fn run_facets(config: Option<&Path>, args: &ViewArgs) -> Result<()> {
    let session = open_session(config, args)?;
    println!("{}", facets_table(&session));
    println!("{}", session.summary());
    Ok(())
}

pub fn run_show(config: Option<&Path>, args: &SettingArgs) -> Result<()> {
    let session = open_session(config, &args.view)?;
    let setting = find_setting(&session, &args.name)?;
    println!("{}", setting_table(setting, selected_version(&session)));
    Ok(())
}

pub fn run_render(config: Option<&Path>, args: &RenderArgs) -> Result<()> {
    let span = info_span!("render", dataset = %args.view.dataset.display());
    let _guard = span.enter();

    let mut options = PageOptions {
        generated_at: Some(Utc::now()),
        ..PageOptions::default()
    };
    if let Some(title) = &args.title {
        options.title.clone_from(title);
    }

    let mut config = load_preferences(config);
    if let Some(theme) = args.theme {
        config.general.dark_mode = matches!(theme, ThemeChoice::Dark);
    }
    let page = match read_dataset(&args.view.dataset) {
        Ok(dataset) => {
            let now = Instant::now();
            let session = start_session(config, dataset, &args.view, now)?;
            let layout = args
                .hide_facets
                .iter()
                .fold(PageLayout::default(), |layout, facet| {
                    layout.without((*facet).into())
                });
            render_page(&session, &layout, &options, now).context("render page")?
        }
        Err(error) => {
            // The page still gets written so a broken build is visible.
            let page = render_load_error(&error, &options).context("render error page")?;
            write_output(args.output.as_deref(), &page)?;
            return Err(error).context("load dataset");
        }
    };
    write_output(args.output.as_deref(), &page)?;
    if let Some(path) = &args.output {
        info!(path = %path.display(), bytes = page.len(), "page written");
    }
    Ok(())
}

pub fn run_link(config: Option<&Path>, args: &LinkArgs) -> Result<()> {
    let session = open_session(config, &args.setting.view)?;
    let setting = find_setting(&session, &args.setting.name)?;
    let link = session.link_for(setting);
    if args.no_copy {
        println!("{link}");
        return Ok(());
    }

    let stderr = io::stderr();
    let is_terminal = stderr.is_terminal();
    let mut primary = Osc52Clipboard::new(stderr.lock(), is_terminal);
    let mut fallback = PrintFallback::new(io::stdout().lock());
    match copy_with_fallback(&mut primary, &mut fallback, link.as_str()) {
        CopyOutcome::Primary => eprintln!("Copied {link}"),
        CopyOutcome::Fallback => debug!("link printed instead of copied"),
        CopyOutcome::Abandoned => debug!("link could not be delivered"),
    }
    Ok(())
}

pub fn run_theme(config: Option<&Path>, args: &ThemeArgs) -> Result<()> {
    let path = resolve_config_path(config)
        .ok_or_else(|| anyhow!("no config directory available; pass --config"))?;
    let current = Theme::from_dark_mode(ExplorerConfig::load_or_default(&path).general.dark_mode);
    let theme = match args.action {
        None => {
            println!("{}", current.as_str());
            return Ok(());
        }
        Some(ThemeAction::Light) => Theme::Light,
        Some(ThemeAction::Dark) => Theme::Dark,
        Some(ThemeAction::Toggle) => current.toggled(),
    };
    save_theme(&path, theme).with_context(|| format!("save {}", path.display()))?;
    println!("{}", theme.as_str());
    Ok(())
}

pub fn run_shortcuts() -> Result<()> {
    println!("{}", shortcuts_table());
    Ok(())
}

fn load_preferences(config: Option<&Path>) -> ExplorerConfig {
    load_config(resolve_config_path(config).as_deref())
}

fn open_session(config: Option<&Path>, view: &ViewArgs) -> Result<ExplorerSession> {
    let span = info_span!("dataset", path = %view.dataset.display());
    let _guard = span.enter();
    let dataset = read_dataset(&view.dataset).context("load dataset")?;
    start_session(load_preferences(config), dataset, view, Instant::now())
}

fn start_session(
    config: ExplorerConfig,
    dataset: Dataset,
    view: &ViewArgs,
    now: Instant,
) -> Result<ExplorerSession> {
    let page = config
        .display
        .page_url()
        .with_context(|| format!("invalid page_url {:?}", config.display.page_url))?;
    let location = build_location(&page, view.filters.url.as_deref(), &view.filters.overrides());
    debug!(%location, "opening session");
    let mut session = ExplorerSession::open(config, location);
    session.attach_dataset(dataset, now);
    Ok(session)
}

fn read_dataset(path: &Path) -> std::result::Result<Dataset, LoadError> {
    if path.as_os_str() == "-" {
        load_dataset_from_reader(io::stdin().lock())
    } else {
        load_dataset(path)
    }
}

fn find_setting<'a>(session: &'a ExplorerSession, name: &str) -> Result<&'a Setting> {
    let dataset = session
        .dataset()
        .ok_or_else(|| anyhow!("dataset not loaded"))?;
    let scopes = &session.state().scopes;
    let in_scope = dataset
        .iter()
        .find(|(scope, setting)| setting.name == name && scopes.contains(scope))
        .map(|(_, setting)| setting);
    match in_scope.or_else(|| dataset.find_any(name)) {
        Some(setting) => Ok(setting),
        None => bail!("no setting named {name:?}"),
    }
}

fn write_output(path: Option<&Path>, page: &str) -> Result<()> {
    match path {
        Some(path) => fs::write(path, page).with_context(|| format!("write {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(page.as_bytes()).context("write stdout")?;
            stdout.flush().context("flush stdout")
        }
    }
}
