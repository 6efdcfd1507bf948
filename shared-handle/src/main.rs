use io_impl::RealIo;
use shared_handle_lib::app::run;
use std::io;

fn main() -> io::Result<()> {
    env_logger::init();
    run(&RealIo())
}
