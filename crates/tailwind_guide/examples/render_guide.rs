use std::error::Error;

use tailwind_guide::tutorial::{self, DEFAULT_OUTPUT_FILE};

fn main() -> Result<(), Box<dyn Error>> {
    let summary = tutorial::tailwind_setup_guide()?.render(DEFAULT_OUTPUT_FILE)?;
    println!(
        "Generated {} ({} bytes, {} pages)",
        summary.path.display(),
        summary.bytes,
        summary.page_count
    );
    Ok(())
}
