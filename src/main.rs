use std::fs::File;
use std::io::{
    stdin,
    stdout,
    Write,
};
use std::path::Path;
use std::process::exit;

use env_logger;
use log::{debug, error};

use genconf::{
    Compiler,
    ConfigError,
    LowLevelConfig,
    Options,
};
use genconf::sign::pgp::SecretRing;
use genconf::topology::HostEnvironment;

mod arg;

use arg::Settings;

fn load(settings: &Settings) -> Result<Options, ConfigError> {
    match &settings.config {
        Some(path) => {
            debug!("reading config from {}", path);
            Options::from_path(Path::new(path))
        },
        None => Options::from_reader(stdin()),
    }
}

fn emit(settings: &Settings, conf: &LowLevelConfig) -> std::io::Result<()> {
    let mut w: Box<dyn Write> = match &settings.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(stdout()),
    };
    serde_json::to_writer_pretty(&mut w, conf)?;
    w.write_all(b"\n")?;
    w.flush()
}

fn main() {
    env_logger::init();

    let settings = Settings::from_args();

    let conf = match load(&settings) {
        Ok(v) => v,
        Err(e) => {
            error!("{}", e);
            exit(1);
        },
    };

    let env = HostEnvironment;
    let keys = SecretRing;
    let low = match Compiler::new(&env, &keys).compile(conf) {
        Ok(v) => v,
        Err(e) => {
            error!("{}", e);
            exit(1);
        },
    };

    if let Err(e) = emit(&settings, &low) {
        error!("cannot write config: {}", e);
        exit(1);
    }
}
