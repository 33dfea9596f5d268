// SPDX-License-Identifier: MPL-2.0
use iced_notify::app::{self, Flags};

fn main() -> iced::Result {
    tracing_subscriber::fmt::init();

    let mut args = pico_args::Arguments::from_env();
    let config_dir = match args.opt_value_from_str("--config-dir") {
        Ok(dir) => dir,
        Err(err) => {
            tracing::error!(%err, "ignoring invalid --config-dir");
            None
        }
    };

    app::run(Flags { config_dir })
}
