use jieqi_engine::ucci::ucci_top::run_stdio_loop;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .write_style(env_logger::WriteStyle::Never)
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(err) = run_stdio_loop() {
        log::error!("stdio loop failed: {err}");
        std::process::exit(1);
    }
}
