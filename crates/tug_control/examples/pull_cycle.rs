//! Drives a full pull-to-refresh cycle against an in-process scroll region.
//!
//! Run with transition logging:
//!
//! ```sh
//! RUST_LOG=debug cargo run -p tug_control --example pull_cycle
//! ```

use std::time::Duration;

use tug_control::{RefreshControl, ScrollContainer, ScrollRegion, SharedContainer};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug".into()),
        )
        .init();

    let region = ScrollRegion::shared(0.0);
    let container: SharedContainer = region.clone();

    let control = RefreshControl::new().on_refresh(|| {
        println!("refresh requested — caller would fetch data now");
    });
    control.attach(&container)?;

    // The user pulls down past the -50 threshold...
    for offset in [-10.0, -30.0, -55.0, -70.0] {
        ScrollRegion::set_offset(&region, offset, true);
        println!("offset {offset:>6.1}  state {:?}", control.state());
    }

    // ...and lets go.
    ScrollRegion::set_offset(&region, -70.0, false);
    println!("released       state {:?}", control.state());

    // Let the inset transition settle (the host frame loop would do this)
    region.lock().unwrap().tick(Duration::from_millis(300));
    println!("inset while refreshing: {}", region.lock().unwrap().top_inset());

    // The data refresh finishes.
    control.end_refreshing();
    region.lock().unwrap().tick(Duration::from_millis(300));
    println!(
        "done           state {:?}  inset {}",
        control.state(),
        region.lock().unwrap().top_inset()
    );

    Ok(())
}
