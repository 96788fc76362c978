mod surface;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pd_core::{OverlayEngine, OverlayState, SizeTier};
use pd_store::{Config, DisplayConfig, Store, default_base_dir};

use crate::surface::TraceSurface;

#[derive(Parser)]
#[command(name = "petdesk", about = "Desktop pet overlay placement engine")]
struct Cli {
    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the persisted overlay state
    State {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Attach the overlay
    Show,

    /// Detach the overlay
    Hide,

    /// Select a size tier (small, medium, large)
    Size {
        tier: SizeTier,
    },

    /// Set opacity; values outside [0.2, 1.0] are clamped
    Opacity {
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },

    /// Place the overlay at an exact position (no snapping)
    Move {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },

    /// Replay a drag gesture: touch down at --from, move through each --via,
    /// release at --to
    Drag {
        /// Touch-down point, as X,Y
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        from: (f64, f64),

        /// Release point, as X,Y
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        to: (f64, f64),

        /// Intermediate move events, as X,Y
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        via: Vec<(f64, f64)>,

        /// Display size as WIDTHxHEIGHT (defaults to config)
        #[arg(long, value_parser = parse_display, allow_hyphen_values = true)]
        display: Option<(i64, i64)>,

        /// Abandon the gesture instead of releasing it
        #[arg(long)]
        cancel: bool,
    },

    /// Forget the persisted state
    Reset,

    /// Print the effective configuration
    Config,

    /// Export state to a JSON file
    Export {
        /// Output file path
        path: PathBuf,
    },

    /// Import state from a JSON file
    Import {
        /// Input file path
        path: PathBuf,
    },
}

fn parse_point(s: &str) -> std::result::Result<(f64, f64), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{s}'"))?;
    let x = x
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad x in '{s}': {e}"))?;
    let y = y
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad y in '{s}': {e}"))?;
    Ok((x, y))
}

fn parse_display(s: &str) -> std::result::Result<(i64, i64), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w = w
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("bad width in '{s}': {e}"))?;
    let h = h
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("bad height in '{s}': {e}"))?;
    Ok((w, h))
}

type Engine = OverlayEngine<Store, TraceSurface>;

struct Session {
    config: Config,
    base_dir: PathBuf,
}

impl Session {
    fn open() -> Result<Self> {
        let base_dir = default_base_dir();
        let config = Config::load(&base_dir).context("failed to load config")?;
        Ok(Self { config, base_dir })
    }

    fn store(&self) -> Result<Store> {
        Store::open_in(&self.base_dir).context("failed to open overlay store")
    }

    fn engine(&self) -> Result<Engine> {
        let store = self.store()?;
        Ok(OverlayEngine::start(
            store,
            TraceSurface::default(),
            self.config.overlay.density,
        ))
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let session = Session::open()?;
    match &cli.command {
        Commands::State { json } => cmd_state(&session, *json),
        Commands::Show => cmd_visible(&session, true),
        Commands::Hide => cmd_visible(&session, false),
        Commands::Size { tier } => cmd_size(&session, *tier),
        Commands::Opacity { value } => cmd_opacity(&session, *value),
        Commands::Move { x, y } => cmd_move(&session, *x, *y),
        Commands::Drag {
            from,
            to,
            via,
            display,
            cancel,
        } => cmd_drag(&session, *from, *to, via, *display, *cancel),
        Commands::Reset => cmd_reset(&session),
        Commands::Config => cmd_config(&session),
        Commands::Export { path } => cmd_export(&session, path),
        Commands::Import { path } => cmd_import(&session, path),
    }
}

fn print_state(state: &OverlayState, density: f64) {
    println!("visible:      {}", state.visible);
    println!(
        "position:     ({:.1}, {:.1})",
        state.position.x, state.position.y
    );
    println!(
        "size:         {} ({}dp, {}px)",
        state.size_tier,
        state.size_tier.edge_dp(),
        state.size_tier.edge_px(density)
    );
    println!("transparency: {:.2}", state.transparency());
}

fn cmd_state(session: &Session, json: bool) -> Result<()> {
    let engine = session.engine()?;
    let state = engine.current_state();
    if json {
        let text = serde_json::to_string_pretty(state).context("failed to serialize state")?;
        println!("{text}");
    } else {
        print_state(state, engine.density());
    }
    Ok(())
}

fn cmd_visible(session: &Session, visible: bool) -> Result<()> {
    let mut engine = session.engine()?;
    engine.set_visible(visible)?;
    println!("{}", if visible { "overlay shown" } else { "overlay hidden" });
    Ok(())
}

fn cmd_size(session: &Session, tier: SizeTier) -> Result<()> {
    let mut engine = session.engine()?;
    engine.set_size_tier(tier)?;
    println!(
        "size set to {tier} ({}px)",
        engine.surface().edge_px
    );
    Ok(())
}

fn cmd_opacity(session: &Session, value: f64) -> Result<()> {
    let mut engine = session.engine()?;
    let applied = engine.set_transparency(value)?;
    if (applied - value).abs() > f64::EPSILON {
        println!("transparency set to {applied:.2} (clamped from {value})");
    } else {
        println!("transparency set to {applied:.2}");
    }
    Ok(())
}

fn cmd_move(session: &Session, x: f64, y: f64) -> Result<()> {
    let mut engine = session.engine()?;
    engine.set_position(x, y)?;
    println!("moved to ({x:.1}, {y:.1})");
    Ok(())
}

fn cmd_drag(
    session: &Session,
    from: (f64, f64),
    to: (f64, f64),
    via: &[(f64, f64)],
    display: Option<(i64, i64)>,
    cancel: bool,
) -> Result<()> {
    let mut engine = session.engine()?;
    let display = display
        .map(|(width, height)| DisplayConfig { width, height })
        .unwrap_or_else(|| session.config.display.clone());

    engine.begin_drag(from.0, from.1)?;
    for &(x, y) in via.iter().chain(std::iter::once(&to)) {
        engine.on_drag_move(x, y)?;
    }

    if cancel {
        engine.cancel_drag()?;
        let p = engine.current_state().position;
        println!("drag cancelled, back at ({:.1}, {:.1})", p.x, p.y);
        return Ok(());
    }

    let state = engine
        .end_drag_on(&display)
        .context("drag release rejected")?;
    tracing::debug!(
        "gesture replayed with {} surface moves",
        engine.surface().moves
    );
    println!(
        "released at ({:.1}, {:.1}) on {}x{}",
        state.position.x, state.position.y, display.width, display.height
    );
    Ok(())
}

fn cmd_reset(session: &Session) -> Result<()> {
    let store = session.store()?;
    if store
        .clear_overlay_state()
        .context("failed to clear state")?
    {
        println!("overlay state reset to defaults");
    } else {
        println!("nothing to reset");
    }
    Ok(())
}

fn cmd_config(session: &Session) -> Result<()> {
    println!("data_dir: {}", session.base_dir.display());
    print!("{}", session.config.to_toml().context("failed to render config")?);
    Ok(())
}

fn cmd_export(session: &Session, path: &Path) -> Result<()> {
    let store = session.store()?;
    store
        .export_json_file(path)
        .context("failed to export JSON")?;
    println!("exported to {}", path.display());
    Ok(())
}

fn cmd_import(session: &Session, path: &Path) -> Result<()> {
    let store = session.store()?;
    store
        .import_json_file(path)
        .context("failed to import JSON")?;
    let state = store
        .load_overlay_state()
        .context("failed to load state after import")?
        .unwrap_or_default();
    println!("imported from {}", path.display());
    print_state(&state, session.config.overlay.density);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("10,20").unwrap(), (10.0, 20.0));
        assert_eq!(parse_point("-5.5, 3").unwrap(), (-5.5, 3.0));
        assert!(parse_point("10").is_err());
        assert!(parse_point("a,b").is_err());
    }

    #[test]
    fn test_parse_display() {
        assert_eq!(parse_display("1080x2340").unwrap(), (1080, 2340));
        assert_eq!(parse_display("720X1280").unwrap(), (720, 1280));
        assert_eq!(parse_display("0x100").unwrap(), (0, 100));
        assert!(parse_display("1080").is_err());
        assert!(parse_display("wide x tall").is_err());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
