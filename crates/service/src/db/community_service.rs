use sea_orm::{
    sea_query::{Expr, Func, LikeExpr, Query, SimpleExpr, SubQueryStatement},
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, Select,
};
use tracing::debug;

use models::community::{self, Entity as CommunityEntity, NewCommunity};
use models::{community_subscriber, post};

use crate::community::domain::{ListCommunities, SortTerm};
use crate::errors::ServiceError;

/// Correlated `(SELECT COUNT(fk) FROM child WHERE child.fk = community.id)`.
fn related_count<E, C>(child: E, fk: C) -> SimpleExpr
where
    E: EntityTrait,
    C: ColumnTrait,
{
    let sub = Query::select()
        .expr(Func::count(Expr::col((child, fk))))
        .from(child)
        .and_where(Expr::col((child, fk)).equals((CommunityEntity, community::Column::Id)))
        .to_owned();
    SimpleExpr::SubQuery(None, Box::new(SubQueryStatement::SelectStatement(sub)))
}

impl SortTerm {
    /// Expression the listing is ordered by.
    pub fn order_expr(self) -> SimpleExpr {
        match self {
            SortTerm::Id => Expr::col((CommunityEntity, community::Column::Id)).into(),
            SortTerm::CreatedAt => Expr::col((CommunityEntity, community::Column::CreatedAt)).into(),
            SortTerm::PostsCount => related_count(post::Entity, post::Column::CommunityId),
            SortTerm::SubscribersCount => {
                related_count(community_subscriber::Entity, community_subscriber::Column::CommunityId)
            }
        }
    }
}

/// `%key%` with LIKE metacharacters in `key` escaped by `\`.
fn contains_pattern(key: &str) -> LikeExpr {
    let mut escaped = String::with_capacity(key.len());
    for ch in key.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    LikeExpr::new(format!("%{escaped}%")).escape('\\')
}

/// Filtered and ordered select for a listing, without paging applied.
///
/// Ties on non-id keys are broken by id in the same direction.
pub fn build_list_select(query: &ListCommunities) -> Select<CommunityEntity> {
    let mut finder = CommunityEntity::find();
    if let Some(key) = query.search_key() {
        finder = finder.filter(
            Condition::any()
                .add(Expr::col((CommunityEntity, community::Column::Name)).like(contains_pattern(key)))
                .add(Expr::col((CommunityEntity, community::Column::Description)).like(contains_pattern(key))),
        );
    }
    let order = if query.ascending { Order::Asc } else { Order::Desc };
    finder = finder.order_by(query.sort.order_expr(), order.clone());
    if query.sort != SortTerm::Id {
        finder = finder.order_by(community::Column::Id, order);
    }
    finder
}

/// List one page of communities, filtered and sorted per `query`.
pub async fn list_communities(db: &DatabaseConnection, query: &ListCommunities) -> Result<Vec<community::Model>, ServiceError> {
    let (page_idx, per_page) = query.pagination.validate()?;
    debug!(sort = query.sort.as_str(), ascending = query.ascending, search = ?query.search_key(), page_idx, per_page, "list communities");
    // SeaORM's paginate uses 0-based page index internally via fetch_page
    let rows = build_list_select(query)
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows)
}

/// Get a community by id.
pub async fn get_community(db: &DatabaseConnection, id: i32) -> Result<Option<community::Model>, ServiceError> {
    let found = CommunityEntity::find_by_id(id).one(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(found)
}

/// Create a community from a creation payload.
pub async fn create_community(db: &DatabaseConnection, new: NewCommunity) -> Result<community::Model, ServiceError> {
    // validations are in models::community
    let created = community::create(db, new).await?;
    Ok(created)
}

/// Whether a row with `id` exists.
pub async fn community_exists(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    Ok(community::exists(db, id).await?)
}

/// Overwrite every column of an existing community.
pub async fn replace_community(db: &DatabaseConnection, replacement: community::Model) -> Result<community::Model, ServiceError> {
    Ok(community::replace(db, replacement).await?)
}

/// Delete a community; returns false if no row had that id.
pub async fn delete_community(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    let affected = community::hard_delete(db, id).await?;
    Ok(affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::Pagination;
    use crate::test_support::get_db;
    use chrono::{Duration, TimeZone, Utc};
    use sea_orm::{ActiveModelTrait, Set};

    fn new(name: &str, description: &str) -> NewCommunity {
        NewCommunity { name: name.into(), description: description.into() }
    }

    fn list(sort: &str, ascending: bool, search: Option<&str>, page: i64, per_page: i64) -> ListCommunities {
        ListCommunities::new(
            Pagination { page, per_page },
            SortTerm::resolve(Some(sort)),
            ascending,
            search.map(str::to_string),
        )
    }

    fn ids(rows: &[community::Model]) -> Vec<i32> {
        rows.iter().map(|c| c.id).collect()
    }

    async fn seed(db: &DatabaseConnection, n: usize) -> Result<Vec<community::Model>, anyhow::Error> {
        let mut out = Vec::new();
        for i in 0..n {
            out.push(create_community(db, new(&format!("community {i}"), &format!("description {i}"))).await?);
        }
        Ok(out)
    }

    #[tokio::test]
    async fn community_crud_service() -> Result<(), anyhow::Error> {
        let db = get_db().await?;

        let c = create_community(&db, new("golang", "go lang")).await?;
        let found = get_community(&db, c.id).await?.unwrap();
        assert_eq!(found, c);
        assert!(community_exists(&db, c.id).await?);

        let mut replacement = found.clone();
        replacement.name = "gophers".into();
        replacement.description = String::new();
        replace_community(&db, replacement).await?;
        let after = get_community(&db, c.id).await?.unwrap();
        assert_eq!(after.name, "gophers");
        assert_eq!(after.description, "");

        assert!(delete_community(&db, c.id).await?);
        assert!(get_community(&db, c.id).await?.is_none());
        assert!(!delete_community(&db, c.id).await?);
        Ok(())
    }

    #[tokio::test]
    async fn default_and_unknown_sort_order_by_id() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let seeded = seed(&db, 4).await?;
        let expected = ids(&seeded);

        for term in ["", "  ", "id", "ID", "popularity"] {
            let rows = list_communities(&db, &list(term, true, None, 1, 10)).await?;
            assert_eq!(ids(&rows), expected, "sortTerm={term:?}");
        }

        let rows = list_communities(&db, &list("nonsense", false, None, 1, 10)).await?;
        let mut reversed = expected.clone();
        reversed.reverse();
        assert_eq!(ids(&rows), reversed);
        Ok(())
    }

    #[tokio::test]
    async fn created_at_descending_is_non_increasing() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        // Insert out of chronological order so id order and time order differ
        for (name, offset_days) in [("b", 2), ("a", 0), ("d", 5), ("c", 2)] {
            community::ActiveModel {
                name: Set(name.into()),
                description: Set(String::new()),
                created_at: Set((base + Duration::days(offset_days)).into()),
                ..Default::default()
            }
            .insert(&db)
            .await?;
        }

        let rows = list_communities(&db, &list("createdat", false, None, 1, 10)).await?;
        assert_eq!(rows.len(), 4);
        assert!(rows.windows(2).all(|w| w[0].created_at >= w[1].created_at));
        assert_eq!(rows[0].name, "d");
        assert_eq!(rows[3].name, "a");

        let asc = list_communities(&db, &list("CreatedAt", true, None, 1, 10)).await?;
        assert!(asc.windows(2).all(|w| w[0].created_at <= w[1].created_at));
        Ok(())
    }

    #[tokio::test]
    async fn search_key_matches_name_or_description() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let go = create_community(&db, new("golang", "go lang")).await?;
        let by_desc = create_community(&db, new("gophers", "all about golang tooling")).await?;
        create_community(&db, new("python", "snakes")).await?;

        let rows = list_communities(&db, &list("id", true, Some("golang"), 1, 10)).await?;
        assert_eq!(ids(&rows), vec![go.id, by_desc.id]);
        assert!(rows.iter().all(|c| c.name.contains("golang") || c.description.contains("golang")));

        let none = list_communities(&db, &list("id", true, Some("rust"), 1, 10)).await?;
        assert!(none.is_empty());

        let blank = list_communities(&db, &list("id", true, Some("   "), 1, 10)).await?;
        assert_eq!(blank.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn search_key_wildcards_match_literally() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        create_community(&db, new("golang", "go lang")).await?;
        let percent = create_community(&db, new("100% rust", "")).await?;
        let slashed = create_community(&db, new("back\\slash", "")).await?;

        let names = |rows: Vec<community::Model>| rows.into_iter().map(|c| c.name).collect::<Vec<_>>();

        assert!(list_communities(&db, &list("id", true, Some("_"), 1, 10)).await?.is_empty());
        assert!(list_communities(&db, &list("id", true, Some("g_lang"), 1, 10)).await?.is_empty());
        let rows = list_communities(&db, &list("id", true, Some("%"), 1, 10)).await?;
        assert_eq!(names(rows), vec![percent.name.clone()]);
        let rows = list_communities(&db, &list("id", true, Some("0% r"), 1, 10)).await?;
        assert_eq!(names(rows), vec![percent.name]);
        let rows = list_communities(&db, &list("id", true, Some("\\"), 1, 10)).await?;
        assert_eq!(names(rows), vec![slashed.name]);
        Ok(())
    }

    #[tokio::test]
    async fn pages_are_consecutive_slices() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let all = ids(&seed(&db, 7).await?);

        let page1 = list_communities(&db, &list("id", true, None, 1, 3)).await?;
        let page2 = list_communities(&db, &list("id", true, None, 2, 3)).await?;
        let page3 = list_communities(&db, &list("id", true, None, 3, 3)).await?;
        let page4 = list_communities(&db, &list("id", true, None, 4, 3)).await?;
        assert_eq!(ids(&page1), all[0..3]);
        assert_eq!(ids(&page2), all[3..6]);
        assert_eq!(ids(&page3), all[6..7]);
        assert!(page4.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn invalid_paging_is_rejected() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        seed(&db, 1).await?;
        for (page, per_page) in [(0, 10), (-2, 10), (1, 0), (1, -5)] {
            let err = list_communities(&db, &list("id", true, None, page, per_page)).await.unwrap_err();
            assert!(matches!(err, ServiceError::Validation(_)), "page={page} per_page={per_page}");
        }
        Ok(())
    }

    #[tokio::test]
    async fn sorts_by_related_counts() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let seeded = seed(&db, 3).await?;
        let (quiet, busy, mid) = (&seeded[0], &seeded[1], &seeded[2]);

        for i in 0..3 {
            post::create(&db, busy.id, &format!("busy {i}"), "").await?;
        }
        post::create(&db, mid.id, "mid", "").await?;
        for user in 0..2 {
            community_subscriber::subscribe(&db, quiet.id, user).await?;
        }
        community_subscriber::subscribe(&db, mid.id, 1).await?;

        let by_posts = list_communities(&db, &list("postscount", false, None, 1, 10)).await?;
        assert_eq!(ids(&by_posts), vec![busy.id, mid.id, quiet.id]);

        let by_posts_asc = list_communities(&db, &list("postscount", true, None, 1, 10)).await?;
        assert_eq!(ids(&by_posts_asc), vec![quiet.id, mid.id, busy.id]);

        let by_subs = list_communities(&db, &list("subscriberscount", false, None, 1, 10)).await?;
        assert_eq!(ids(&by_subs), vec![quiet.id, mid.id, busy.id]);
        Ok(())
    }

    #[tokio::test]
    async fn count_ties_fall_back_to_id() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let seeded = ids(&seed(&db, 3).await?);

        let asc = list_communities(&db, &list("postscount", true, None, 1, 10)).await?;
        assert_eq!(ids(&asc), seeded);
        let desc = list_communities(&db, &list("subscriberscount", false, None, 1, 10)).await?;
        let mut reversed = seeded.clone();
        reversed.reverse();
        assert_eq!(ids(&desc), reversed);
        Ok(())
    }
}
