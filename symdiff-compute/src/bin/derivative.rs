use log::{info, warn};
use simplelog::{ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode};
use symdiff_compute::symbolic::{derivative_with_steps, expr::build::*, Derivative, Expr};

/// Parses the log level given as the first command-line argument, defaulting to `info`.
fn log_level() -> LevelFilter {
    match std::env::args().nth(1).as_deref() {
        Some("trace") => LevelFilter::Trace,
        Some("debug") => LevelFilter::Debug,
        Some("warn") => LevelFilter::Warn,
        Some("error") => LevelFilter::Error,
        Some("off") => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}

fn main() {
    let logger = CombinedLogger::init(vec![TermLogger::new(
        log_level(),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
    if let Err(err) = logger {
        eprintln!("could not initialize logger: {err}");
    }

    let exprs: Vec<Expr> = vec![
        pow(x(), constant(3.0)) + constant(5.0) * x() + constant(6.0),
        sin(x()) * x(),
        sin(x()) / x(),
        cos(x() * x()),
        sqrt(exp(x()) + constant(1.0)),
        pow(x(), x()),
        constant(2.0) * constant(3.0),
        x() * ln(x()),
    ];

    for expr in &exprs {
        let input = expr.to_string();
        let mut steps = Vec::new();

        match derivative_with_steps(expr, &mut steps) {
            Ok(Derivative::Zero) => println!("({input})' = 0"),
            Ok(Derivative::Expr(df)) => {
                println!("({input})' = {df}");
                info!("{} nodes in, {} nodes out", expr.complexity(), df.complexity());
            },
            Err(err) => {
                warn!("skipping `{input}`");
                if let Err(io_err) = err.report_to_stderr("input", &input) {
                    eprintln!("could not print report: {io_err}");
                }
                continue;
            },
        }

        println!("  rules applied: {steps:?}");
    }
}
