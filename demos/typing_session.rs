//! Replays a typing session and a pool session, printing each step.
//!
//! Run with `RUST_LOG=debug` to see commit and pool events.

use memds::{AutocompleteSystem, PhoneDirectory};

fn main() {
    env_logger::init();
    typing_session();
    pool_session();
}

fn typing_session() {
    println!("=== AutocompleteSystem ===\n");

    let mut ac = AutocompleteSystem::new(
        &["i love you", "island", "ironman", "i love leetcode"],
        &[5, 3, 2, 2],
    );

    for c in "i a#i a".chars() {
        let suggestions = ac.input(c);
        println!("{:>8?} -> {:?}", ac.pending(), suggestions);
    }
    println!("history size: {}\n", ac.len());
}

fn pool_session() {
    println!("=== PhoneDirectory ===\n");

    let mut dir = PhoneDirectory::new(3);
    for _ in 0..3 {
        println!("get() = {}", dir.get());
    }
    dir.release(1);
    println!("release(1); check(1) = {}", dir.check(1));
    println!("get() = {}", dir.get());
    println!("get() = {}", dir.get());
    println!(
        "outstanding: {}, available: {}",
        dir.outstanding(),
        dir.available()
    );
}
