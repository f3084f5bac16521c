use joistframe::settings::{DegeneratePolicy, FrameSettings, Material, Real, SettingEdit};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum LogFormat {
    Compact,
    Full,
    Pretty,
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Compact => f.write_str("compact"),
            LogFormat::Full => f.write_str("full"),
            LogFormat::Pretty => f.write_str("pretty"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

#[derive(Debug, clap::Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Logging output filters; comma-separated
    #[arg(
        short,
        long,
        default_value = "warn,joistframe=info,frame_cli=info",
        env = "FRAME_CLI_LOG_FILTER"
    )]
    pub log_filter: String,
    /// Logging output format
    #[arg(long, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
    /// Size of the box along the span axis
    #[arg(short, long, default_value_t = 2.0)]
    pub x: Real,
    /// Height of the box
    #[arg(short, long, default_value_t = 1.0)]
    pub y: Real,
    /// Depth of the box
    #[arg(short, long, default_value_t = 2.0)]
    pub z: Real,
    /// Number of joists
    #[arg(short, long, default_value_t = 3)]
    pub joists: usize,
    /// Size of each joist along the span axis
    #[arg(long, default_value_t = 1.5)]
    pub member_width: Real,
    /// Height of each joist
    #[arg(long, default_value_t = 0.5)]
    pub member_depth: Real,
    /// Added to the member width to get the end inset
    #[arg(long, default_value_t = -1.0, allow_negative_numbers = true)]
    pub inset_bias: Real,
    #[arg(long, default_value_t = Material::Normal)]
    pub material: Material,
    #[arg(long)]
    pub wireframe: bool,
    /// Show the joists instead of the solid box
    #[arg(long)]
    pub show_frame: bool,
    /// Fail instead of warning when joists overlap
    #[arg(long)]
    pub reject_overlap: bool,
    /// Viewport size in pixels
    #[arg(long, default_value = "800x600", value_parser = parse_size, value_name = "WxH")]
    pub viewport: (Real, Real),
    /// Seconds of auto-rotation to simulate after building the viewport
    #[arg(long, default_value_t = 0.0)]
    pub spin: Real,
    /// Edits to commit after building the viewport, in order
    #[arg(short, long = "set", value_name = "FIELD=VALUE")]
    pub edits: Vec<SettingEdit>,
}

impl Cli {
    /// The settings described by the command line, before any `--set` edits.
    pub fn settings(&self) -> FrameSettings {
        FrameSettings {
            x: self.x,
            y: self.y,
            z: self.z,
            show_frame: self.show_frame,
            joist_count: self.joists,
            member_width: self.member_width,
            member_depth: self.member_depth,
            inset_bias: self.inset_bias,
            material: self.material,
            wireframe: self.wireframe,
            auto_rotate: self.spin > 0.0,
            degenerate: if self.reject_overlap {
                DegeneratePolicy::Reject
            } else {
                DegeneratePolicy::Warn
            },
        }
    }
}

fn parse_size(s: &str) -> Result<(Real, Real), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let (w, h) = s
        .trim()
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
    Ok((w.trim().parse()?, h.trim().parse()?))
}

/// Set up pretty log output
pub(crate) fn initialize_tracing(log_filter: &str, log_format: LogFormat) {
    let tsub = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::OffsetTime::new(
            time::UtcOffset::current_local_offset().unwrap_or_else(|e| {
                tracing::warn!("couldn't get local time offset: {:?}", e);
                time::UtcOffset::UTC
            }),
            time::macros::format_description!("[hour]:[minute]:[second]"),
        ))
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_env_filter(log_filter);

    match log_format {
        LogFormat::Compact => tsub.compact().init(),
        LogFormat::Full => tsub.init(),
        LogFormat::Pretty => tsub.pretty().init(),
        LogFormat::Json => tsub.json().init(),
    }
}
