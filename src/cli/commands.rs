//! CLI command handlers
//!
//! Implements the `watch`, `list`, and `env create` subcommands over a
//! connected session.

use std::time::Duration;

use anyhow::Result;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
use kube::ResourceExt;

use crate::constants::{PART_OF_SOLUTION_LABEL, SOLUTION_VERSION_LABEL};
use crate::session::{SessionEvent, SolutionsSession};

/// Resource family printable by `list`.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ListTarget {
    Solutions,
    Services,
    Environments,
}

/// Run both refresh loops and report store changes until interrupted.
pub async fn run_watch(mut session: SolutionsSession) -> Result<()> {
    session.start_solutions_refresh();
    session.start_environments_refresh();
    println!("Watching solutions and environments (Ctrl-C to quit)");

    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    let mut last_counts = (usize::MAX, usize::MAX, usize::MAX);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                session.stop_solutions_refresh();
                session.stop_environments_refresh();
                println!("Stopping refresh loops");
                return Ok(());
            }
            _ = ticker.tick() => {
                for event in session.drain_events() {
                    match event {
                        SessionEvent::RefreshStopped { family, error } => {
                            eprintln!("{family} refresh stopped: {error}");
                        }
                        SessionEvent::Navigate(route) => {
                            println!("navigate: {route}");
                        }
                    }
                }
                let store = session.store();
                let counts = (
                    store.solutions().len(),
                    store.services().len(),
                    store.environments().len(),
                );
                if counts != last_counts {
                    println!(
                        "{} solutions, {} services, {} environments",
                        counts.0, counts.1, counts.2
                    );
                    last_counts = counts;
                }
            }
        }
    }
}

/// Fetch one resource family and print it.
pub async fn run_list(session: &SolutionsSession, target: ListTarget) -> Result<()> {
    match target {
        ListTarget::Solutions => {
            session.refresh_solutions_once().await?;
            print_solutions(session);
        }
        ListTarget::Services => {
            session.refresh_solutions_once().await?;
            print_services(session);
        }
        ListTarget::Environments => {
            session.refresh_environments_once().await?;
            print_environments(session);
        }
    }
    Ok(())
}

/// Create an environment and report where to find it.
pub async fn run_env_create(
    mut session: SolutionsSession,
    name: &str,
    description: &str,
) -> Result<()> {
    let created = session.create_environment(name, description).await?;
    println!("Environment '{}' created", created.name_any());

    // Creation re-fetches the environment list and points consumers at the
    // solutions listing; surface that route here.
    if let Some(SessionEvent::Navigate(route)) = session.recv_event().await {
        println!("View it under {route}");
    }
    Ok(())
}

fn print_solutions(session: &SolutionsSession) {
    println!(
        "{:<28} {:<14} {:<9} {}",
        "SOLUTION", "VERSION", "DEPLOYED", "UI URL"
    );
    for solution in session.store().solutions() {
        for version in &solution.versions {
            println!(
                "{:<28} {:<14} {:<9} {}",
                solution.name,
                version.version,
                if version.deployed { "yes" } else { "no" },
                if version.ui_url.is_empty() {
                    "-"
                } else {
                    version.ui_url.as_str()
                },
            );
        }
    }
}

fn print_services(session: &SolutionsSession) {
    println!(
        "{:<20} {:<28} {:<24} {}",
        "NAMESPACE", "NAME", "PART-OF", "VERSION"
    );
    for service in session.store().services() {
        let labels = service.metadata.labels.clone().unwrap_or_default();
        println!(
            "{:<20} {:<28} {:<24} {}",
            service.namespace().unwrap_or_default(),
            service.name_any(),
            labels
                .get(PART_OF_SOLUTION_LABEL)
                .map(String::as_str)
                .unwrap_or("-"),
            labels
                .get(SOLUTION_VERSION_LABEL)
                .map(String::as_str)
                .unwrap_or("-"),
        );
    }
}

fn print_environments(session: &SolutionsSession) {
    println!("{:<24} {:<8} {}", "ENVIRONMENT", "AGE", "DESCRIPTION");
    for environment in session.store().environments() {
        println!(
            "{:<24} {:<8} {}",
            environment.name_any(),
            format_age(environment.metadata.creation_timestamp.as_ref()),
            environment.spec.description.as_deref().unwrap_or("-"),
        );
    }
}

/// Compact age rendering, kubectl-style.
fn format_age(creation: Option<&Time>) -> String {
    let Some(Time(created)) = creation else {
        return "-".to_string();
    };
    let age = chrono::Utc::now().signed_duration_since(*created);
    if age.num_days() > 0 {
        format!("{}d", age.num_days())
    } else if age.num_hours() > 0 {
        format!("{}h", age.num_hours())
    } else if age.num_minutes() > 0 {
        format!("{}m", age.num_minutes())
    } else {
        format!("{}s", age.num_seconds().max(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_age_buckets() {
        let now = chrono::Utc::now();
        assert_eq!(format_age(None), "-");
        assert_eq!(
            format_age(Some(&Time(now - chrono::Duration::days(3)))),
            "3d"
        );
        assert_eq!(
            format_age(Some(&Time(now - chrono::Duration::hours(5)))),
            "5h"
        );
        assert_eq!(
            format_age(Some(&Time(now - chrono::Duration::minutes(42)))),
            "42m"
        );
    }
}
