//! rMemo main entrypoint.

use rmemo::run;
use rmemo::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
