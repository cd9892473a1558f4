use crate::data_retrieval::api::{ApiError, StatsApi};
use crate::error::DuoError;
use crate::match_stats::{DuoSet, PlayerIdentity};
use crate::types::Region;

/// Resolves a typed name to a player with exactly one lookup call.
/// Surrounding whitespace is ignored; an empty name makes no call at all.
pub async fn resolve_player<A: StatsApi + ?Sized>(
    api: &A,
    region: &Region,
    raw_name: &str,
) -> Result<PlayerIdentity, DuoError> {
    let name = raw_name.trim();
    if name.is_empty() {
        return Err(DuoError::EmptyInput);
    }
    match api.lookup_player_by_name(region, name).await {
        Ok(identity) => Ok(identity),
        Err(ApiError::NotFound(_)) => {
            info!("Summoner {} not found.", name);
            Err(DuoError::NotFound(name.to_string()))
        }
        Err(e) => Err(DuoError::UpstreamError(e)),
    }
}

/// Resolves a comma separated list of names, keeping input order.
pub async fn build_duo_set<A: StatsApi + ?Sized>(
    api: &A,
    region: &Region,
    raw_list: &str,
) -> Result<DuoSet, DuoError> {
    if raw_list.is_empty() {
        return Err(DuoError::EmptyInput);
    }
    let names: Vec<&str> = raw_list.split(',').collect();
    let mut members = Vec::with_capacity(names.len());
    for name in names.iter() {
        members.push(resolve_player(api, region, name).await?);
    }
    // Guards the one-member-per-name contract should resolution ever skip names.
    if members.len() != names.len() {
        return Err(DuoError::DuoCountMismatch {
            expected: names.len(),
            resolved: members.len(),
        });
    }
    DuoSet::new(members).ok_or(DuoError::EmptyInput)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{player, FakeApi, Failure};

    fn region() -> Region {
        "na1".to_string()
    }

    #[tokio::test]
    async fn empty_name_makes_no_call() {
        let api = FakeApi::new();
        assert!(matches!(
            resolve_player(&api, &region(), "").await,
            Err(DuoError::EmptyInput)
        ));
        assert!(matches!(
            resolve_player(&api, &region(), "   ").await,
            Err(DuoError::EmptyInput)
        ));
        assert_eq!(0, api.lookup_calls());
    }

    #[tokio::test]
    async fn resolves_known_player() {
        let api = FakeApi::new().with_player(player("Alice"));
        let identity = resolve_player(&api, &region(), " Alice ").await.unwrap();
        assert_eq!(player("Alice"), identity);
        assert_eq!(1, api.lookup_calls());
    }

    #[tokio::test]
    async fn unknown_player_is_not_found() {
        let api = FakeApi::new();
        match resolve_player(&api, &region(), "Nobody").await {
            Err(DuoError::NotFound(name)) => assert_eq!("Nobody", name),
            other => panic!("expected not found, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn upstream_failure_is_reported() {
        let api = FakeApi::new()
            .with_player(player("Alice"))
            .failing(Failure::Lookup);
        let err = resolve_player(&api, &region(), "Alice").await.unwrap_err();
        assert!(matches!(err, DuoError::UpstreamError(_)));
    }

    #[tokio::test]
    async fn empty_duo_list_makes_no_call() {
        let api = FakeApi::new();
        assert!(matches!(
            build_duo_set(&api, &region(), "").await,
            Err(DuoError::EmptyInput)
        ));
        assert_eq!(0, api.lookup_calls());
    }

    #[tokio::test]
    async fn duo_set_keeps_input_order() {
        let api = FakeApi::new()
            .with_player(player("Bob"))
            .with_player(player("Alice"));
        let duos = build_duo_set(&api, &region(), "Bob,Alice").await.unwrap();
        assert_eq!(2, duos.len());
        assert_eq!("Bob\nAlice", duos.display_names());
        assert_eq!(2, api.lookup_calls());
    }

    #[tokio::test]
    async fn duo_set_has_one_member_per_name() {
        let api = FakeApi::new()
            .with_player(player("Alice"))
            .with_player(player("Bob"));
        for (raw, expected) in &[("Alice", 1), ("Alice,Bob", 2), ("Bob, Alice,Bob", 3)] {
            let duos = build_duo_set(&api, &region(), raw).await.unwrap();
            assert_eq!(*expected, duos.len());
            assert_eq!(*expected, raw.split(',').count());
        }
    }

    #[tokio::test]
    async fn duo_set_propagates_resolver_errors() {
        let api = FakeApi::new().with_player(player("Alice"));
        assert!(matches!(
            build_duo_set(&api, &region(), "Alice,Ghost").await,
            Err(DuoError::NotFound(_))
        ));
        assert!(matches!(
            build_duo_set(&api, &region(), "Alice,").await,
            Err(DuoError::EmptyInput)
        ));
    }
}
