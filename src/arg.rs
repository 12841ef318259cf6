use clap::{
    App,
    Arg,
    ArgMatches,
};

pub struct Settings {
    pub config: Option<String>,
    pub output: Option<String>,
}

impl Settings {

    pub fn new() -> Settings {
        Settings {
            config: None,
            output: None,
        }
    }

    fn bind_from_args(&mut self, arg: &ArgMatches) {
        if let Some(v) = arg.value_of("config") {
            self.config = Some(v.to_string());
        }
        if let Some(v) = arg.value_of("output") {
            self.output = Some(v.to_string());
        }
    }

    pub fn from_args() -> Settings {
        let mut o = App::new("genconf");
        o = o.version(env!("CARGO_PKG_VERSION"));
        o = o.about("Generate the low-level server config from a high-level config");
        o = o.arg(
            Arg::with_name("config")
                .long("config")
                .short("c")
                .value_name("High-level config file. Reads stdin if omitted.")
                .takes_value(true)
                );
        o = o.arg(
            Arg::with_name("output")
                .long("output")
                .short("o")
                .value_name("Where to write the low-level config. Writes stdout if omitted.")
                .takes_value(true)
                );

        let arg_matches = o.get_matches();
        let mut settings = Settings::new();
        settings.bind_from_args(&arg_matches);
        settings
    }
}
