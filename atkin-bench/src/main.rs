//! Atkin Sieve Benchmark Harness
//! Compares: atkin quadratic-form sieve vs `primes` crate vs `primal` crate
//!
//! Usage: cargo run --release

use std::fmt;
use std::time::{Duration, Instant};

use atkin::atkin_primes;

// ─── Wrappers for crate implementations ────────────────────────────────────

fn primes_crate_sieve(n: u64) -> Vec<u64> {
    use primes::{PrimeSet, Sieve};
    let mut sieve = Sieve::new();
    sieve.iter().take_while(|&p| p <= n).collect()
}

fn primal_crate_iter(n: u64) -> Vec<u64> {
    primal::Primes::all()
        .take_while(|&p| p <= n as usize)
        .map(|p| p as u64)
        .collect()
}

fn primal_crate_sieve(n: u64) -> Vec<u64> {
    let sieve = primal::Sieve::new(n as usize);
    sieve
        .primes_from(0)
        .take_while(|&p| p <= n as usize)
        .map(|p| p as u64)
        .collect()
}

// ─── Benchmarking machinery ────────────────────────────────────────────────

struct Measurement {
    name: &'static str,
    prime_count: usize,
    times: Vec<Duration>,
}

impl Measurement {
    fn min(&self) -> Duration {
        *self.times.iter().min().unwrap()
    }

    fn median(&self) -> Duration {
        let mut sorted = self.times.clone();
        sorted.sort();
        sorted[sorted.len() / 2]
    }

    fn mean(&self) -> Duration {
        let total: Duration = self.times.iter().sum();
        total / self.times.len() as u32
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<22} │ {:>10} │ {:>10} │ {:>10} │ {:>9}",
            self.name,
            format_duration(self.min()),
            format_duration(self.median()),
            format_duration(self.mean()),
            self.prime_count,
        )
    }
}

fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos < 1_000 {
        format!("{} ns", nanos)
    } else if nanos < 1_000_000 {
        format!("{:.1} µs", nanos as f64 / 1_000.0)
    } else if nanos < 1_000_000_000 {
        format!("{:.2} ms", nanos as f64 / 1_000_000.0)
    } else {
        format!("{:.2} s", nanos as f64 / 1_000_000_000.0)
    }
}

fn bench<F>(name: &'static str, n: u64, iterations: usize, f: F) -> Measurement
where
    F: Fn(u64) -> Vec<u64>,
{
    // Warmup
    let _ = f(n);

    let mut times = Vec::with_capacity(iterations);
    let mut prime_count = 0;

    for _ in 0..iterations {
        let start = Instant::now();
        let result = f(n);
        times.push(start.elapsed());
        prime_count = result.len();
        std::hint::black_box(&result);
    }

    Measurement { name, prime_count, times }
}

fn print_header() {
    println!(
        "{:<22} │ {:>10} │ {:>10} │ {:>10} │ {:>9}",
        "Implementation", "Min", "Median", "Mean", "π(n)"
    );
    println!("{}", "─".repeat(75));
}

fn main() {
    println!("Sieve of Atkin benchmark — quadratic forms vs classic sieves");
    println!();

    let test_sizes: Vec<u64> = vec![10_000, 100_000, 1_000_000, 10_000_000];
    let iterations = 20;

    for &n in &test_sizes {
        println!("n = {} ({} iterations)", n, iterations);
        print_header();

        let atkin = bench("atkin (bit-packed)", n, iterations, atkin_primes);
        println!("{}", atkin);

        // primes crate iterates one candidate at a time — skip it at large n
        let primes_res = if n <= 1_000_000 {
            let m = bench("primes crate (iter)", n, iterations, primes_crate_sieve);
            println!("{}", m);
            Some(m)
        } else {
            println!("{:<22} │ {:>10} │ {:>10} │ {:>10} │ {:>9}",
                "primes crate (iter)", "—", "skipped", "n > 1M", "—");
            None
        };

        let primal_iter = bench("primal (iterator)", n, iterations, primal_crate_iter);
        println!("{}", primal_iter);

        let primal_direct = bench("primal (Sieve::new)", n, iterations, primal_crate_sieve);
        println!("{}", primal_direct);

        // All implementations must agree on π(n)
        assert_eq!(atkin.prime_count, primal_iter.prime_count,
            "MISMATCH at n={}: atkin={} vs primal_iter={}", n, atkin.prime_count, primal_iter.prime_count);
        assert_eq!(atkin.prime_count, primal_direct.prime_count,
            "MISMATCH at n={}: atkin={} vs primal_direct={}", n, atkin.prime_count, primal_direct.prime_count);
        if let Some(ref m) = primes_res {
            assert_eq!(atkin.prime_count, m.prime_count,
                "MISMATCH at n={}: atkin={} vs primes={}", n, atkin.prime_count, m.prime_count);
        }

        let mut entries: Vec<(&str, Duration)> = vec![
            ("atkin", atkin.median()),
            ("primal iter", primal_iter.median()),
            ("primal sieve", primal_direct.median()),
        ];
        if let Some(ref m) = primes_res {
            entries.push(("primes crate", m.median()));
        }
        let fastest = entries.iter().map(|&(_, d)| d).min().unwrap();

        println!();
        println!("π({}) = {}   all implementations agree ✓", n, atkin.prime_count);
        for (name, time) in &entries {
            let ratio = time.as_nanos() as f64 / fastest.as_nanos() as f64;
            if ratio <= 1.01 {
                println!("  {:14} : fastest", name);
            } else {
                println!("  {:14} : {:.2}x slower", name, ratio);
            }
        }
        println!();
    }

    println!("Benchmark complete.");
}
