//! `vidplan tones` and `vidplan durations`.

use vidplan_core::brief::{DurationBucket, Tone};
use vidplan_core::templates;

pub fn run_tones() {
    print!("{}", tones_listing());
}

pub fn run_durations() {
    print!("{}", durations_listing());
}

fn tones_listing() -> String {
    Tone::ALL
        .iter()
        .map(|tone| format!("{:<14} {}\n", tone.to_string(), tone.label_hindi()))
        .collect()
}

fn durations_listing() -> String {
    let library = templates::library();
    DurationBucket::ALL
        .iter()
        .map(|bucket| {
            let shots = library.tier(*bucket).shots.len();
            format!(
                "{:<5} {} - {shots} shots\n",
                bucket.seconds(),
                bucket.suggestion()
            )
        })
        .collect()
}
