use bounded_thompson::{Campaign, RandomStream, StreamSource};
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bounded_thompson=info".into()),
        )
        .init();

    println!("bounded-thompson: Outreach Campaign Simulation\n");
    println!("{}", "=".repeat(60));

    // Response rate of each message; the first is the control
    let true_rates = [("control", 0.05), ("reminder", 0.08), ("incentive", 0.15)];
    let rates: HashMap<&str, f64> = true_rates.iter().copied().collect();

    println!("True response rates:");
    for (treatment, rate) in &true_rates {
        println!("  {}: {:.2}", treatment, rate);
    }
    println!("{}", "=".repeat(60));

    let campaign = Campaign::builder()
        .treatments(true_rates.iter().map(|(name, _)| *name))
        .epsilon(0.2)
        .num_draws(500)
        .build()
        .unwrap();

    let mut stream = RandomStream::seed_from_u64(239102);
    let mut responses = RandomStream::seed_from_u64(7);
    let mut decisions: Vec<&str> = Vec::new();
    let mut outcomes: Vec<u8> = Vec::new();

    // Each wave assigns a fresh batch of recipients from all history so far
    for wave in 1..=5 {
        let batch = campaign
            .assign(&decisions, &outcomes, StreamSource::FromHandle(&mut stream))
            .unwrap();

        let mut per_group: HashMap<String, usize> = HashMap::new();
        let mut uniform = 0;
        for assignment in &batch {
            *per_group.entry(assignment.group_label()).or_insert(0) += 1;
            if assignment.by_uniform_rule {
                uniform += 1;
            }

            let responded = responses.random::<f64>() < rates[assignment.treatment];
            decisions.push(assignment.treatment);
            outcomes.push(u8::from(responded));
        }

        println!(
            "\nWave {wave}: {} recipients, {} by uniform rule",
            batch.len(),
            uniform
        );
        let mut groups: Vec<_> = per_group.into_iter().collect();
        groups.sort();
        for (label, count) in groups {
            println!("  {}: {}", label, count);
        }
    }

    // Posterior view after all waves
    let theta = campaign
        .theta(&decisions, &outcomes, StreamSource::FromSeed(123))
        .unwrap();
    let wins = theta.win_probabilities();
    let means = theta.arm_means();

    println!("\n{}", "=".repeat(60));
    println!("Posterior after {} recipients:", decisions.len());
    for (arm, treatment) in campaign.treatments().iter().enumerate() {
        println!(
            "  {} ({}): mean {:.3}, P(best) {:.3}",
            treatment, bounded_thompson::group_label(arm), means[arm], wins[arm]
        );
    }
}
