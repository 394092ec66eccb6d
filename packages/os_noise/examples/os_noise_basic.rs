//! Demonstrates capturing the process activity counters around a window of work.
//!
//! The counters only say something useful as a pair: one [`Snapshot`] before the work,
//! one after, and the delta between them is the operating-system activity the window
//! absorbed.
//!
//! Run with: `cargo run --example os_noise_basic`.
//!
//! [`Snapshot`]: os_noise::Snapshot

use os_noise::Snapshot;

fn main() -> Result<(), os_noise::Error> {
    println!("=== Activity Counter Example ===");
    println!();

    let before = Snapshot::capture()?;

    // Touch a few fresh megabytes page by page. First touches of anonymous memory are
    // exactly what the minor fault counter counts, so this reliably moves it.
    let mut scratch = vec![0_u8; 8 * 1024 * 1024];
    for page in scratch.chunks_mut(4096) {
        page[0] = 1;
    }

    let after = Snapshot::capture()?;
    let activity = after.delta_since(&before);

    println!("major faults:         {}", activity.major_faults());
    println!("minor faults:         {}", activity.minor_faults());
    println!("voluntary switches:   {}", activity.voluntary_switches());
    println!("involuntary switches: {}", activity.involuntary_switches());
    println!();

    if activity.involuntary_switches() == 0 {
        println!("The window ran without preemption.");
    } else {
        println!("The window was preempted - a timed measurement would be suspect.");
    }

    Ok(())
}
