use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use jupytergl_engine::coords::Vec3;
use jupytergl_engine::glu::{load_identity, make_look_at, make_perspective, make_program, translate};
use jupytergl_engine::logging::{init_logging, LoggingConfig};
use jupytergl_remote::{
    JsonLinesTransport, RecordingTransport, RemoteConfig, RemoteContext, Transport,
};

const USAGE: &str = "usage: jupytergl-studio [--dry-run] [--trace] <vertex.glsl> <fragment.glsl>";

struct Args {
    dry_run: bool,
    trace: bool,
    vertex_path: String,
    fragment_path: String,
}

fn parse_args() -> Result<Args> {
    let mut dry_run = false;
    let mut trace = false;
    let mut paths = Vec::new();

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--dry-run" => dry_run = true,
            "--trace" => trace = true,
            "-h" | "--help" => {
                eprintln!("{USAGE}");
                std::process::exit(0);
            }
            flag if flag.starts_with("--") => bail!("unknown flag {flag}\n{USAGE}"),
            _ => paths.push(arg),
        }
    }

    let [vertex_path, fragment_path]: [String; 2] = paths
        .try_into()
        .map_err(|_| anyhow::anyhow!("expected two shader paths\n{USAGE}"))?;

    Ok(Args { dry_run, trace, vertex_path, fragment_path })
}

/// Builds the demo program and uploads its camera matrices.
fn run<T: Transport>(ctx: &mut RemoteContext<T>, vertex: &str, fragment: &str) -> Result<()> {
    let linked = make_program(ctx, vertex, fragment).context("building shader program")?;
    let program = linked.delete_shaders(ctx).context("releasing shader objects")?;
    ctx.use_program(&program)?;

    let projection = make_perspective(45.0, 4.0 / 3.0, 0.1, 100.0);
    let view = make_look_at(
        Vec3::new(0.0, 0.0, 6.0),
        Vec3::zero(),
        Vec3::new(0.0, 1.0, 0.0),
    );
    let mut model = load_identity();
    translate(&mut model, Vec3::new(0.0, 0.0, -6.0));

    for (name, m) in [("uProjection", projection), ("uView", view), ("uModel", model)] {
        match ctx.get_uniform_location(&program, name)? {
            Some(loc) => ctx.uniform_matrix4fv(&loc, &m)?,
            None => log::warn!("uniform {name} is not active in the program"),
        }
    }

    log::info!("program {} ready", program.key());
    Ok(())
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());
    let args = parse_args()?;

    let vertex = std::fs::read_to_string(&args.vertex_path)
        .with_context(|| format!("reading {}", args.vertex_path))?;
    let fragment = std::fs::read_to_string(&args.fragment_path)
        .with_context(|| format!("reading {}", args.fragment_path))?;

    let config = RemoteConfig { trace: args.trace, ..Default::default() };

    if args.dry_run {
        let mut ctx = RemoteContext::with_config(RecordingTransport::dry_run(), config);
        run(&mut ctx, &vertex, &fragment)?;

        let stdout = io::stdout();
        let mut out = stdout.lock();
        for sent in &ctx.transport().sent {
            serde_json::to_writer(&mut out, &sent.message)?;
            writeln!(out)?;
        }
        return Ok(());
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let transport = JsonLinesTransport::new(stdin.lock(), stdout.lock());
    let mut ctx = RemoteContext::with_config(transport, config);
    run(&mut ctx, &vertex, &fragment)
}
