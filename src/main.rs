// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use serde::Serialize;
use std::env;

use lending_desk::transform::{
    commercial_acquisition_grid, commercial_construction_grid, commercial_refinance_grid,
    invitations_grid, lenders_grid, residential_acquisition_grid, residential_construction_grid,
    residential_refinance_grid, transform_commercial_acquisition,
    transform_commercial_construction, transform_commercial_refinance, transform_invitations,
    transform_matching_lenders, transform_residential_acquisition,
    transform_residential_construction, transform_residential_refinance, transform_users,
    users_grid,
};
use lending_desk::{
    or_empty, ApiClient, AppConfig, AuthApi, FetchError, Grid, LoanType, OneOrMany, RestIdentity,
    Session,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let api = ApiClient::new(&config.api_url, &config.shared_secret, config.timeout_secs)?;

    let args: Vec<String> = env::args().collect();

    match parse_mode(&args)? {
        Mode::Dashboard => run_dashboard(&api, &config),
        Mode::Dump => run_dump(&api, &config),
        Mode::DumpRecord { loan_type, id } => run_dump_record(&api, loan_type, id),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Dashboard,
    Dump,
    DumpRecord { loan_type: LoanType, id: i64 },
}

fn parse_mode(args: &[String]) -> Result<Mode> {
    match args.get(1).map(String::as_str) {
        None => Ok(Mode::Dashboard),
        Some("dump") => match &args[2..] {
            [] => Ok(Mode::Dump),
            [slug, id] => {
                let loan_type = LoanType::from_slug(slug)
                    .with_context(|| format!("unknown application type: {}", slug))?;
                let id: i64 = id
                    .parse()
                    .with_context(|| format!("invalid application id: {}", id))?;
                Ok(Mode::DumpRecord { loan_type, id })
            }
            _ => anyhow::bail!("usage: lending-desk dump [<type> <id>]"),
        },
        Some(other) => anyhow::bail!(
            "unknown mode: {} (usage: lending-desk [dump [<type> <id>]])",
            other
        ),
    }
}

/// One dashboard page: the display grid plus its rows as JSON for dump mode.
struct Page {
    grid: Grid,
    rows: serde_json::Value,
}

fn page<R, Row: Serialize>(
    what: &str,
    fetched: Result<Vec<R>, FetchError>,
    transform: impl Fn(Option<OneOrMany<R>>) -> Vec<Row>,
    build_grid: impl Fn(&[Row]) -> Grid,
) -> Page {
    let rows = transform(Some(OneOrMany::Many(or_empty(what, fetched))));
    Page {
        grid: build_grid(&rows),
        rows: serde_json::to_value(&rows).unwrap_or_default(),
    }
}

fn build_pages(api: &ApiClient, config: &AppConfig) -> Vec<Page> {
    let mut pages = vec![
        page(
            "commercial acquisition applications",
            api.applications(LoanType::CommercialAcquisition),
            transform_commercial_acquisition,
            commercial_acquisition_grid,
        ),
        page(
            "commercial construction applications",
            api.applications(LoanType::CommercialConstruction),
            transform_commercial_construction,
            commercial_construction_grid,
        ),
        page(
            "commercial refinance applications",
            api.applications(LoanType::CommercialRefinance),
            transform_commercial_refinance,
            commercial_refinance_grid,
        ),
        page(
            "residential acquisition applications",
            api.applications(LoanType::ResidentialAcquisition),
            transform_residential_acquisition,
            residential_acquisition_grid,
        ),
        page(
            "residential construction applications",
            api.applications(LoanType::ResidentialConstruction),
            transform_residential_construction,
            residential_construction_grid,
        ),
        page(
            "residential refinance applications",
            api.applications(LoanType::ResidentialRefinance),
            transform_residential_refinance,
            residential_refinance_grid,
        ),
        page(
            "lenders",
            api.lenders(),
            transform_matching_lenders,
            |rows| {
                let mut grid = lenders_grid(rows);
                grid.title = "Lenders".to_string();
                grid
            },
        ),
    ];

    let (users, invitations) = admin_pages(config);
    pages.push(users);
    pages.push(invitations);
    pages
}

/// The user-management and invitation pages, gated on staff credentials.
/// Any failure signing in or fetching degrades to an explanatory empty page
/// rather than taking the dashboard down.
fn admin_pages(config: &AppConfig) -> (Page, Page) {
    match try_admin_pages(config) {
        Ok(pages) => pages,
        Err(err) => {
            tracing::warn!("admin pages unavailable: {:#}", err);
            gated_pages("Admin access required")
        }
    }
}

fn try_admin_pages(config: &AppConfig) -> Result<(Page, Page)> {
    let (Some(identity), Some(staff)) = (&config.identity, &config.staff) else {
        return Ok(gated_pages(
            "Set IDENTITY_API_KEY, STAFF_EMAIL and STAFF_PASSWORD to manage users",
        ));
    };

    let provider = RestIdentity::new(&identity.api_url, &identity.api_key, config.timeout_secs)?;
    let backend = AuthApi::new(&config.api_url, config.timeout_secs)?;
    let mut session = Session::new(provider, backend.clone());
    session.sign_in(&staff.email, &staff.password)?;

    let user = session.backend_user().context("session has no account")?;
    if !user.is_admin() {
        return Ok(gated_pages("Admin access required"));
    }
    let token = session.bearer().context("session has no token")?;

    let users = transform_users(backend.users(token)?);
    let invitations = transform_invitations(backend.invitations(token)?);

    Ok((
        Page {
            grid: users_grid(&users),
            rows: serde_json::to_value(&users).unwrap_or_default(),
        },
        Page {
            grid: invitations_grid(&invitations),
            rows: serde_json::to_value(&invitations).unwrap_or_default(),
        },
    ))
}

fn gated_pages(message: &str) -> (Page, Page) {
    let users = users_grid(&[]).with_empty_state(message);
    let invitations = invitations_grid(&[]).with_empty_state(message);
    (
        Page {
            grid: users,
            rows: serde_json::Value::Array(Vec::new()),
        },
        Page {
            grid: invitations,
            rows: serde_json::Value::Array(Vec::new()),
        },
    )
}

/// Print every page as JSON, for piping into other tools.
fn run_dump(api: &ApiClient, config: &AppConfig) -> Result<()> {
    let pages = build_pages(api, config);
    let dump: Vec<serde_json::Value> = pages
        .into_iter()
        .map(|p| {
            serde_json::json!({
                "title": p.grid.title,
                "rows": p.rows,
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&dump)?);
    Ok(())
}

/// Print one application record and its matching lenders. Unlike the list
/// pages, a failed detail fetch is fatal here.
fn run_dump_record(api: &ApiClient, loan_type: LoanType, id: i64) -> Result<()> {
    let record = match loan_type {
        LoanType::CommercialAcquisition => api
            .application(loan_type, id)?
            .map(|r| transform_commercial_acquisition(Some(OneOrMany::One(r))))
            .and_then(|rows| serde_json::to_value(rows.first()).ok()),
        LoanType::CommercialConstruction => api
            .application(loan_type, id)?
            .map(|r| transform_commercial_construction(Some(OneOrMany::One(r))))
            .and_then(|rows| serde_json::to_value(rows.first()).ok()),
        LoanType::CommercialRefinance => api
            .application(loan_type, id)?
            .map(|r| transform_commercial_refinance(Some(OneOrMany::One(r))))
            .and_then(|rows| serde_json::to_value(rows.first()).ok()),
        LoanType::ResidentialAcquisition => api
            .application(loan_type, id)?
            .map(|r| transform_residential_acquisition(Some(OneOrMany::One(r))))
            .and_then(|rows| serde_json::to_value(rows.first()).ok()),
        LoanType::ResidentialConstruction => api
            .application(loan_type, id)?
            .map(|r| transform_residential_construction(Some(OneOrMany::One(r))))
            .and_then(|rows| serde_json::to_value(rows.first()).ok()),
        LoanType::ResidentialRefinance => api
            .application(loan_type, id)?
            .map(|r| transform_residential_refinance(Some(OneOrMany::One(r))))
            .and_then(|rows| serde_json::to_value(rows.first()).ok()),
    };

    let Some(record) = record else {
        println!("No {} application #{}", loan_type.title(), id);
        return Ok(());
    };

    let lenders = transform_matching_lenders(Some(OneOrMany::Many(or_empty(
        "matching lenders",
        api.matching_lenders(loan_type, id),
    ))));

    let output = serde_json::json!({
        "application": record,
        "matchingLenders": lenders,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[cfg(feature = "tui")]
fn run_dashboard(api: &ApiClient, config: &AppConfig) -> Result<()> {
    tracing::info!("loading dashboard pages from {}", config.api_url);
    let grids: Vec<Grid> = build_pages(api, config).into_iter().map(|p| p.grid).collect();

    let mut app = ui::App::new(grids);
    ui::run_ui(&mut app)?;
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_dashboard(_api: &ApiClient, _config: &AppConfig) -> Result<()> {
    anyhow::bail!("built without the tui feature; use `lending-desk dump` instead")
}
