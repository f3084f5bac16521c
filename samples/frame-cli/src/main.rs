use clap::Parser;
use joistframe::{settings::Real, viewport::Controller};

mod backend;
mod cli;

use backend::TracingBackend;

/// Simulated frame rate for `--spin`.
const TICK: Real = 1.0 / 60.0;

#[derive(Debug, thiserror::Error)]
enum Error {
    #[error(transparent)]
    Layout(#[from] joistframe::Error<Real>),
}

fn main() -> Result<(), Error> {
    let cli = cli::Cli::parse();
    cli::initialize_tracing(&cli.log_filter, cli.log_format);

    let (width, height) = cli.viewport;
    let mut ctl = Controller::new(TracingBackend::default(), cli.settings(), width, height)?;

    for &edit in &cli.edits {
        let outcome = ctl.commit(edit)?;
        tracing::info!(field = %edit.field, action = ?outcome.action, "committed edit");
        if let Some(w) = outcome.warning {
            tracing::warn!(%w, "frame has overlapping joists");
        }
    }

    let mut elapsed = 0.0;
    while elapsed < cli.spin {
        ctl.tick(TICK);
        elapsed += TICK;
    }

    let state = ctl.state();
    tracing::info!(
        mode = %state.mode(),
        vertices = state.vertex_count(),
        live_meshes = ctl.backend().live(),
        "viewport ready"
    );

    if let Some(layout) = state.layout() {
        println!("interval\t{}", layout.spacing().interval());
        for (i, (bb, mesh)) in layout.members().zip(state.members()).enumerate() {
            let c = bb.center();
            print!(
                "joist {i}\t{:.4}\t{:.4}\t{:.4}\tx {:.4}..{:.4}",
                c.x, c.y, c.z, bb.mins.x, bb.maxs.x
            );
            match mesh.world_center {
                Some(w) => println!("\t-> {:.2}\t{:.2}\t{:.2}", w.x, w.y, w.z),
                None => println!(),
            }
        }
    }

    Ok(())
}
