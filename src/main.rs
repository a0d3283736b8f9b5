#[macro_use] extern crate clap;
extern crate env_logger;
#[macro_use] extern crate futures;
extern crate futures_stream_select_all;
#[macro_use] extern crate log;
extern crate serde;
#[macro_use] extern crate serde_derive;
extern crate serde_yaml;
extern crate tokio_core;

mod actions;
mod config;
mod connectivity;
mod driver;
mod monitors;
mod multi;
mod predicate;

use std::fs;

use clap::{Arg, AppSettings};
use futures::future::Executor;
use tokio_core::reactor::Core;

use config::Config;
use driver::drive;

const CHECK_PARAM: &'static str = "CHECK";
const CONFIG_FILE_PARAM: &'static str = "CONFIG_FILE";

fn main() {
    env_logger::init();

    let default_cfg_file = "~/.config/netwatch.yml".to_owned();

    let matches = app_from_crate!()
        .setting(AppSettings::DisableHelpSubcommand)
        .setting(AppSettings::GlobalVersion)
        .arg(
            Arg::with_name(CONFIG_FILE_PARAM)
                .help("The path to the configuration file. Can be either json or yaml.")
                .short("c")
                .long("config")
                .value_name("FILE")
                .default_value(&default_cfg_file)
                .takes_value(true)
                .global(true)
        )
        .arg(
            Arg::with_name(CHECK_PARAM)
                .help("Validate the configuration and exit.")
                .long("check")
                .global(true),
        )
        .get_matches();

    let path = matches.value_of(CONFIG_FILE_PARAM).unwrap();
    let cfg = {
        let rdr = fs::File::open(path)
            .expect(&format!("Could not open config file '{}'. Does it exist?", path));

        let cfg: Config = serde_yaml::from_reader(rdr)
            .expect("Failed to parse config. Please ensure it is valid yaml or json and the structure is valid.");

        if let Err(err) = cfg.validate() {
            panic!("Config is invalid, {}", err);
        }

        cfg
    };

    if matches.is_present(CHECK_PARAM) {
        println!("Configuration '{}' is valid.", path);
        return;
    }

    start(cfg);
}

fn start(config: Config) {
    let mut core = Core::new().unwrap();

    let handle = core.handle();
    let drivers = config.into_iter()
        .map(|profile| drive(profile, handle.clone()))
        .map(|d| d.unwrap())
        .collect::<Vec<_>>();

    info!("Watching connectivity for {} profile(s).", drivers.len());
    for driver in drivers {
        core.execute(driver).unwrap();
    }

    core.run(futures::empty::<(), ()>()).unwrap();
}
