//! Shift Register Simulator - CLI Entry Point
//!
//! Commands:
//! - `shiftreg-sim run <script>` - Run a stimulus script
//! - `shiftreg-sim pulse <mode>` - Clock a register from command-line inputs
//! - `shiftreg-sim test` - Built-in self-test
//!
//! Log output is controlled with `RUST_LOG` (default `warn`).

use clap::{Parser, Subcommand};
use tracing::{event, Level};
use tracing_subscriber::prelude::*;
use shiftreg::{Mode, SimConfig, Snapshot};

#[derive(Parser)]
#[command(name = "shiftreg-sim")]
#[command(version = "0.1.0")]
#[command(about = "A clocked model of SISO, SIPO, PISO and PIPO shift registers")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a stimulus script
    Run {
        /// Path to the script
        script: String,
        /// Print every event as a JSON line
        #[arg(long)]
        json: bool,
        /// Print the diagram labels after every event
        #[arg(short, long)]
        trace: bool,
    },
    /// Clock a register built from command-line inputs
    Pulse {
        /// Register kind: siso, sipo, piso or pipo
        mode: Mode,
        /// Number of flip-flops
        #[arg(short, long, default_value = "4")]
        width: usize,
        /// Serial input string (SISO/SIPO)
        #[arg(short, long)]
        input: Option<String>,
        /// Parallel input word (PISO/PIPO)
        #[arg(short, long)]
        parallel: Option<String>,
        /// Serial input bit used once PISO is shifting
        #[arg(short, long)]
        serial: Option<u8>,
        /// Number of clock pulses (default: one per serial input bit, else 1)
        #[arg(short, long)]
        count: Option<u32>,
        /// Print snapshots as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Run the built-in self-test
    Test,
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run { script, json, trace }) => {
            run_script(&script, json, trace);
        }
        Some(Commands::Pulse { mode, width, input, parallel, serial, count, json }) => {
            let config = SimConfig::new(mode).with_width(width);
            pulse_register(config, input, parallel, serial, count, json);
        }
        Some(Commands::Test) => {
            run_self_test();
        }
        None => {
            println!("Shift Register Simulator v0.1.0");
            println!();
            println!("Use --help for available commands");
            println!();
            demo_modes();
        }
    }
}

fn init_logging() {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}

fn fail(message: impl std::fmt::Display) -> ! {
    event!(Level::ERROR, "{}", message);
    eprintln!("❌ {}", message);
    std::process::exit(1);
}

fn print_snapshot(snapshot: &Snapshot, json: bool, trace: bool) {
    if json {
        println!("{}", snapshot.to_json());
        return;
    }
    println!("{}", snapshot);
    if trace {
        println!("    {}", snapshot.labels().join(" "));
    }
}

fn run_script(path: &str, json: bool, trace: bool) {
    use shiftreg::load_script;

    let script = load_script(path).unwrap_or_else(|e| fail(format!("{}: {}", path, e)));

    if !json {
        println!("📂 {}: {} ({} bits), {} commands",
            path, script.config.mode.title(), script.config.width, script.len());
        println!();
    }

    let (sim, events) = script.run().unwrap_or_else(|e| fail(format!("{}: {}", path, e)));

    for ev in &events {
        if json {
            match serde_json::to_string(ev) {
                Ok(line) => println!("{}", line),
                Err(e) => fail(e),
            }
        } else {
            print_snapshot(&ev.snapshot, false, trace);
        }
    }

    if !json {
        println!();
        println!("━━━ Result ━━━");
        let mode = sim.mode();
        println!("Pulses:     {}", sim.pulses());
        if mode.parallel_output() {
            println!("Parallel out: {}", sim.register());
        } else {
            println!("Register:   {}", sim.register());
        }
        if mode.serial_output() {
            println!("Serial out: {}", sim.register().serial_out());
        }
    }
}

fn pulse_register(
    config: SimConfig,
    input: Option<String>,
    parallel: Option<String>,
    serial: Option<u8>,
    count: Option<u32>,
    json: bool,
) {
    use shiftreg::ShiftRegisterSimulator;

    let mut sim = ShiftRegisterSimulator::with_config(&config).unwrap_or_else(|e| fail(e));

    if let Some(bits) = &input {
        sim.set_serial_string(bits).unwrap_or_else(|e| fail(e));
    }
    if let Some(word) = &parallel {
        sim.set_parallel_word(word).unwrap_or_else(|e| fail(e));
    }
    if let Some(bit) = serial {
        sim.set_serial_bit(bit).unwrap_or_else(|e| fail(e));
    }

    let count = count.unwrap_or_else(|| {
        sim.pending_serial().count().max(1) as u32
    });

    print_snapshot(&sim.snapshot(), json, !json);
    for _ in 0..count {
        sim.pulse();
        print_snapshot(&sim.snapshot(), json, !json);
    }
}

fn demo_modes() {
    use shiftreg::ShiftRegisterSimulator;

    println!("━━━ Shift Register Demo ━━━");

    for mode in Mode::ALL {
        println!();
        println!("{}:", mode.title());

        let Ok(mut sim) = ShiftRegisterSimulator::new(mode, 4) else {
            continue;
        };
        let staged = match mode {
            Mode::Siso | Mode::Sipo => sim.set_serial_string("1011"),
            Mode::Piso => sim
                .set_parallel_word("1100")
                .and_then(|_| sim.set_serial_bit(1)),
            Mode::Pipo => sim.set_parallel_word("0110"),
        };
        if let Err(e) = staged {
            println!("  {}", e);
            continue;
        }

        println!("  {}", sim.snapshot());
        for _ in 0..4 {
            sim.pulse();
            println!("  {}", sim.snapshot());
        }
    }
}

fn run_self_test() {
    use shiftreg::{Bit, LoadShift, ShiftRegisterSimulator};

    println!("━━━ Shift Register Self-Test ━━━");
    println!();

    let mut passed = 0;
    let mut failed = 0;

    let mut check = |name: &str, ok: bool| {
        if ok {
            println!("{}... ✓", name);
            passed += 1;
        } else {
            println!("{}... ✗", name);
            failed += 1;
        }
    };

    // Test 1: SISO shifts 1011 in
    let ok = ShiftRegisterSimulator::new(Mode::Siso, 4)
        .and_then(|mut sim| {
            sim.set_serial_string("1011")?;
            let mut seen = Vec::new();
            for _ in 0..4 {
                sim.pulse();
                seen.push(sim.register().to_string());
            }
            Ok(seen)
        })
        .map(|seen| seen == ["1000", "0100", "1010", "1101"])
        .unwrap_or(false);
    check("SISO shift-in of 1011", ok);

    // Test 2: PISO loads once, then shifts
    let ok = ShiftRegisterSimulator::new(Mode::Piso, 4)
        .and_then(|mut sim| {
            sim.set_parallel_word("1100")?;
            sim.pulse();
            let loaded = sim.register().to_string() == "1100"
                && sim.load_shift() == LoadShift::Shift;
            sim.set_serial_bit(1)?;
            sim.pulse();
            Ok(loaded && sim.register().to_string() == "1110")
        })
        .unwrap_or(false);
    check("PISO load then shift", ok);

    // Test 3: PIPO ignores history
    let ok = ShiftRegisterSimulator::new(Mode::Pipo, 4)
        .and_then(|mut sim| {
            sim.set_parallel_word("1001")?;
            sim.pulse();
            sim.pulse();
            Ok(sim.register().to_string() == "1001")
        })
        .unwrap_or(false);
    check("PIPO parallel load", ok);

    // Test 4: Rejected inputs leave state alone
    let ok = ShiftRegisterSimulator::new(Mode::Sipo, 4)
        .map(|mut sim| {
            let before = sim.snapshot();
            sim.set_serial_string("102").is_err()
                && sim.set_serial_string("").is_err()
                && sim.snapshot() == before
        })
        .unwrap_or(false);
    check("Invalid input rejected atomically", ok);

    // Test 5: Zero width
    check(
        "Zero-width register rejected",
        ShiftRegisterSimulator::new(Mode::Siso, 0).is_err(),
    );

    // Test 6: Serial out is QN
    let ok = ShiftRegisterSimulator::new(Mode::Siso, 2)
        .and_then(|mut sim| {
            sim.set_serial_string("1")?;
            sim.pulse();
            sim.pulse();
            Ok(sim.snapshot().serial_out == Bit::One)
        })
        .unwrap_or(false);
    check("Serial out tracks last flip-flop", ok);

    println!();
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Results: {} passed, {} failed", passed, failed);

    if failed == 0 {
        println!("✓ All tests passed!");
    } else {
        std::process::exit(1);
    }
}
