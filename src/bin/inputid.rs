// Inputid CLI
// Classifies input device nodes and prints the udev properties they would carry

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};

use inputid_core::{
    Classifier, DeviceAction, EvdevMode, EvdevSource, RuleTable, Settings, SysctlTree,
    UdevDevice, UNKNOWN_SUBSYSTEM,
};

/// Input device classifier for BSD device trees
#[derive(Parser, Debug)]
#[command(name = "inputid")]
#[command(author = "inputid contributors")]
#[command(version)]
#[command(about = "Classify input devices and synthesize udev ID_INPUT properties", long_about = None)]
struct Args {
    /// TOML settings file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Whether legacy keyboard/mouse nodes defer to evdev
    #[arg(long, value_enum, value_name = "MODE")]
    evdev: Option<EvdevArg>,

    /// List every input device under the device root
    #[arg(short, long)]
    list: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Device nodes to classify
    #[arg(value_name = "PATH")]
    paths: Vec<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EvdevArg {
    Auto,
    On,
    Off,
}

impl From<EvdevArg> for EvdevMode {
    fn from(arg: EvdevArg) -> Self {
        match arg {
            EvdevArg::Auto => EvdevMode::Auto,
            EvdevArg::On => EvdevMode::On,
            EvdevArg::Off => EvdevMode::Off,
        }
    }
}

/// Main application state
struct Application {
    settings: Settings,
    classifier: Classifier<EvdevSource, SysctlTree>,
}

impl Application {
    fn new(args: &Args) -> anyhow::Result<Self> {
        let mut settings = match &args.config {
            Some(path) => Settings::from_file(path)
                .with_context(|| format!("loading settings from {}", path.display()))?,
            None => Settings::load_default().context("loading default settings")?,
        };
        if let Some(mode) = args.evdev {
            settings.set_evdev_mode(mode.into());
        }

        let evdev_enabled = settings.resolve_evdev_from_kernel();
        log::debug!("EVDEV enabled: {}", evdev_enabled);

        let rules = settings.rule_table(evdev_enabled);
        let classifier = Classifier::new(rules, EvdevSource::new(), SysctlTree)
            .with_virtual_sysname(settings.virtual_sysname());

        Ok(Self {
            settings,
            classifier,
        })
    }

    fn rules(&self) -> &RuleTable {
        self.classifier.rules()
    }

    /// Device nodes under the device root that some rule claims
    fn discover(&self) -> anyhow::Result<Vec<String>> {
        let root = self.settings.dev_root();
        let mut paths = Vec::new();

        for dir in [root.to_path_buf(), root.join("input")] {
            let entries = match std::fs::read_dir(&dir) {
                Ok(entries) => entries,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => {
                    return Err(e).with_context(|| format!("reading {}", dir.display()));
                }
            };
            for entry in entries {
                let path = entry?.path();
                let Some(path) = path.to_str() else {
                    continue;
                };
                if self.rules().subsystem_for(path) != UNKNOWN_SUBSYSTEM {
                    paths.push(path.to_string());
                }
            }
        }

        paths.sort();
        Ok(paths)
    }

    fn run(&self, args: &Args) -> anyhow::Result<()> {
        let mut paths = args.paths.clone();
        if args.list {
            paths.extend(self.discover()?);
        }
        if paths.is_empty() {
            anyhow::bail!("no device paths given (use --list to scan the device root)");
        }

        for (i, path) in paths.iter().enumerate() {
            if i > 0 {
                println!();
            }
            let device = self.classifier.device_for(path, DeviceAction::Add);
            print_device(&device);
        }
        Ok(())
    }
}

/// Print a device record in udevadm info style
fn print_device(device: &UdevDevice) {
    println!("P: {}", device.syspath());
    if let Some(devnode) = device.devnode() {
        println!("N: {}", devnode);
    }
    println!("E: SUBSYSTEM={}", device.subsystem());
    for (key, value) in device.properties() {
        println!("E: {}={}", key, value);
    }

    let mut parent = device.parent();
    while let Some(dev) = parent {
        println!("  parent: {}", dev.syspath());
        for (key, value) in dev.properties() {
            println!("    E: {}={}", key, value);
        }
        for (key, value) in dev.sysattrs() {
            println!("    A: {}={}", key, value);
        }
        parent = dev.parent();
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let app = Application::new(&args)?;
    app.run(&args)
}
