use crate::models::SshHost;

/// Relevance buckets, best first. A host lands in the first one it matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    ExactAlias,
    PrimaryPrefix,
    PrimaryContains,
    AliasPrefix,
    AliasContains,
}

const TIER_COUNT: usize = 5;

impl Tier {
    fn of(host: &SshHost, term: &str) -> Option<Tier> {
        let name = host.name.to_lowercase();
        let host_name = host.host_name.to_lowercase();
        let aliases: Vec<String> = host.aliases.iter().map(|a| a.to_lowercase()).collect();

        if aliases.iter().any(|a| a == term) {
            Some(Tier::ExactAlias)
        } else if name.starts_with(term) || host_name.starts_with(term) {
            Some(Tier::PrimaryPrefix)
        } else if name.contains(term) || host_name.contains(term) {
            Some(Tier::PrimaryContains)
        } else if aliases.iter().any(|a| a.starts_with(term)) {
            Some(Tier::AliasPrefix)
        } else if aliases.iter().any(|a| a.contains(term)) {
            Some(Tier::AliasContains)
        } else {
            None
        }
    }
}

/// Indices into `hosts` of the entries matching `term`, most relevant first.
///
/// An empty term keeps every host in its original order. Within a tier the
/// input order is preserved.
pub fn rank_hosts(hosts: &[SshHost], term: &str) -> Vec<usize> {
    if term.is_empty() {
        return (0..hosts.len()).collect();
    }

    let term = term.to_lowercase();
    let mut buckets: [Vec<usize>; TIER_COUNT] = Default::default();

    for (i, host) in hosts.iter().enumerate() {
        if let Some(tier) = Tier::of(host, &term) {
            buckets[tier as usize].push(i);
        }
    }

    buckets.into_iter().flatten().collect()
}
