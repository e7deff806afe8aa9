//! panel-runner: headless driver for the auth panel state.
//!
//! Usage:
//!   panel-runner --db panel.db show
//!   panel-runner --db panel.db login player01@game.io Player
//!   panel-runner --db panel.db set-metrics 1234.5 -0.19
//!   panel-runner --db panel.db set-activity 42
//!   panel-runner --db panel.db toggle-info
//!   panel-runner --db panel.db logout --has-position --yes
//!   panel-runner --db panel.db reset
//!   panel-runner --config panel.json --ipc-mode

use anyhow::Result;
use authpanel_core::{
    config::PanelConfig,
    logout::{LogoutDecision, LogoutFlow},
    metrics::{parse_stored, MetricsSnapshot, MetricsStore},
    panel::{InfoToggle, PanelRenderer, PanelView, RenderOutcome},
    store::LocalStore,
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    SetMetrics {
        #[serde(default)]
        equity: Option<f64>,
        #[serde(default)]
        roi: Option<f64>,
    },
    SetActivity {
        #[serde(default)]
        activity: Option<f64>,
    },
    Login {
        email: String,
        name: String,
    },
    Logout {
        #[serde(default)]
        has_position: bool,
        #[serde(default)]
        confirm: bool,
    },
    ToggleInfo,
    Reset,
    Quit,
}

#[derive(serde::Serialize)]
struct UiState {
    authenticated:  bool,
    info_collapsed: bool,
    info_label:     &'static str,
    render:         RenderOutcome,
    panel:          PanelView,
    metrics:        MetricsSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    logout:         Option<LogoutDecision>,
}

struct Session {
    store:    MetricsStore<LocalStore>,
    renderer: PanelRenderer,
    toggle:   InfoToggle,
    logout:   LogoutFlow,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");

    let mut config = match flag_value(&args, "--config") {
        Some(path) => PanelConfig::load(path)?,
        None => PanelConfig::default(),
    };
    if let Some(db) = flag_value(&args, "--db") {
        config.db_path = db.to_string();
    }

    let local = if config.db_path == ":memory:" {
        LocalStore::in_memory()?
    } else {
        LocalStore::open(&config.db_path)?
    };
    local.migrate()?;

    let mut store = MetricsStore::open_with_mask(local, config.mask.clone());
    store.set_render_hook(|m| log::debug!("render requested: {m:?}"));
    let toggle = InfoToggle::load(store.storage());

    let mut session = Session {
        store,
        renderer: PanelRenderer::new(),
        toggle,
        logout: LogoutFlow::new(config.logout_delay_ms),
    };

    if ipc_mode {
        return run_ipc_loop(&mut session);
    }

    let positional = positional_args(&args);
    let command = positional.first().map(String::as_str).unwrap_or("show");
    let mut logout = None;
    match command {
        "show" => {}
        "login" => {
            let email = positional.get(1).map(String::as_str).unwrap_or_default();
            let name = positional.get(2).map(String::as_str).unwrap_or_default();
            session.store.set_identity(email, name);
        }
        "set-metrics" => {
            let equity = positional.get(1).and_then(|s| parse_stored(s));
            let roi = positional.get(2).and_then(|s| parse_stored(s));
            session.store.set_metrics(equity, roi);
        }
        "set-activity" => {
            let activity = positional.get(1).and_then(|s| parse_stored(s));
            session.store.set_activity(activity);
        }
        "toggle-info" => {
            session.toggle.toggle(session.store.storage_mut());
        }
        "logout" => {
            let has_position = args.iter().any(|a| a == "--has-position");
            let yes = args.iter().any(|a| a == "--yes");
            logout = Some(request_logout(&mut session, has_position, yes));
        }
        "reset" => reset(&mut session),
        other => anyhow::bail!("Unknown command: {other}"),
    }

    let state = build_ui_state(&mut session, logout);
    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}

fn run_ipc_loop(session: &mut Session) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        let mut logout = None;
        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetState => {}
            IpcCommand::SetMetrics { equity, roi } => session.store.set_metrics(equity, roi),
            IpcCommand::SetActivity { activity } => session.store.set_activity(activity),
            IpcCommand::Login { email, name } => session.store.set_identity(&email, &name),
            IpcCommand::Logout { has_position, confirm } => {
                logout = Some(request_logout(session, has_position, confirm));
            }
            IpcCommand::ToggleInfo => {
                session.toggle.toggle(session.store.storage_mut());
            }
            IpcCommand::Reset => reset(session),
        }

        let state = build_ui_state(session, logout);
        writeln!(stdout, "{}", serde_json::to_string(&state)?)?;
        stdout.flush()?;
    }
    Ok(())
}

/// Runs the whole flow, including the deferred finalize after a
/// position close.
fn request_logout(session: &mut Session, has_position: bool, confirm: bool) -> LogoutDecision {
    let authed = session.store.is_authenticated();
    let decision = session.logout.request(&mut session.store, authed, has_position, |prompt| {
        log::info!("confirm prompt: {prompt:?} -> {confirm}");
        confirm
    });
    if let Some(delay) = decision.delay() {
        log::info!("closing open position before logout");
        std::thread::sleep(delay);
        LogoutFlow::finalize(&mut session.store);
    }
    decision
}

/// The "reset and reload" link: wipe local storage, then re-read it.
fn reset(session: &mut Session) {
    session.store.reset();
    session.store.load();
    session.toggle = InfoToggle::load(session.store.storage());
}

fn build_ui_state(session: &mut Session, logout: Option<LogoutDecision>) -> UiState {
    let authed = session.store.is_authenticated();
    let panel = PanelView::build(&mut session.store, authed);
    let render = session.renderer.render(panel.clone());
    UiState {
        authenticated: authed,
        info_collapsed: session.toggle.is_collapsed(),
        info_label: session.toggle.label(),
        render,
        panel,
        metrics: session.store.snapshot(),
        logout,
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// Arguments that are neither flags nor flag values. Negative numbers
/// such as `-0.19` count as positional.
fn positional_args(args: &[String]) -> Vec<String> {
    const VALUE_FLAGS: [&str; 2] = ["--db", "--config"];
    let mut out = Vec::new();
    let mut skip_next = false;
    for arg in args.iter().skip(1) {
        if skip_next {
            skip_next = false;
            continue;
        }
        if VALUE_FLAGS.contains(&arg.as_str()) {
            skip_next = true;
            continue;
        }
        if arg.starts_with("--") {
            continue;
        }
        out.push(arg.clone());
    }
    out
}
