fn main() {
  if let Err(err) = bench::run() {
    bench::log_error!("{}", err);
    std::process::exit(bench::exit_code(&err));
  }
}
