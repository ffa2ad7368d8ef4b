use std::future::Future;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Run `fut` behind a spinner that resolves to a check mark or a cross.
pub async fn with_spinner<T, E, F>(message: &str, fut: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner:.cyan} {msg}")
            .unwrap()
    );
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(120));

    let result = fut.await;
    let mark = if result.is_ok() {
        style("✓").green().to_string()
    } else {
        style("✗").red().to_string()
    };
    bar.finish_with_message(format!("{} {}", message, mark));
    result
}
