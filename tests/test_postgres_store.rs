//! Postgres store test against a real database.
//!
//! Runs only when `DATABASE_URL` is set (a `.env` file is honoured); every
//! row it writes carries a unique surname so parallel runs do not collide.

use enrich_info::storage::people::{Pagination, PersonStore, SearchFilters, StoreError};
use enrich_info::{EnrichedPerson, PgPersonStore};
use std::time::{SystemTime, UNIX_EPOCH};

async fn connect() -> Option<PgPersonStore> {
    dotenv::dotenv().ok();
    let Ok(url) = std::env::var("DATABASE_URL") else {
        println!("DATABASE_URL not set, skipping postgres store test");
        return None;
    };
    Some(PgPersonStore::connect(&url, 2).await.expect("connect to postgres"))
}

fn unique_surname() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("Pgtest{}", nanos)
}

#[tokio::test]
async fn test_postgres_store_crud_and_search() -> Result<(), Box<dyn std::error::Error>> {
    let Some(store) = connect().await else {
        return Ok(());
    };
    let surname = unique_surname();

    let jane = EnrichedPerson {
        id: 0,
        name: "Jane".into(),
        surname: surname.clone(),
        patronymic: String::new(),
        age: 31,
        gender: "female".into(),
        nationality: "US".into(),
    };
    let id = store.create(&jane).await?;
    assert!(id > 0);
    assert_eq!(store.get(id).await?, EnrichedPerson { id, ..jane.clone() });

    let updated = EnrichedPerson {
        age: 32,
        ..jane.clone()
    };
    store.update(id, &updated).await?;
    assert_eq!(store.get(id).await?.age, 32);

    for (i, (gender, nationality)) in [("male", "US"), ("male", "RU"), ("male", "US")]
        .into_iter()
        .enumerate()
    {
        store
            .create(&EnrichedPerson {
                id: 0,
                name: format!("John{}", i),
                surname: surname.clone(),
                patronymic: String::new(),
                age: 40,
                gender: gender.into(),
                nationality: nationality.into(),
            })
            .await?;
    }

    let male_us = SearchFilters {
        surname: Some(surname.clone()),
        gender: Some("male".into()),
        nationality: Some("US".into()),
        ..Default::default()
    };
    let found = store.search(&male_us, Pagination::default()).await?;
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|p| p.gender == "male" && p.nationality == "US"));

    let all_mine = SearchFilters {
        surname: Some(surname.clone()),
        gender: Some(String::new()),
        ..Default::default()
    };
    let page_one = store.search(&all_mine, Pagination::new(1, 3)).await?;
    let page_zero = store.search(&all_mine, Pagination::new(0, 3)).await?;
    let page_two = store.search(&all_mine, Pagination::new(2, 3)).await?;
    assert_eq!(page_one, page_zero);
    assert_eq!(page_one.len(), 3);
    assert_eq!(page_two.len(), 1);

    let by_age = SearchFilters {
        surname: Some(surname.clone()),
        age: Some(40),
        ..Default::default()
    };
    assert_eq!(store.search(&by_age, Pagination::default()).await?.len(), 3);

    store.delete(id).await?;
    assert!(matches!(store.get(id).await, Err(StoreError::NotFound(_))));
    assert!(matches!(store.delete(id).await, Err(StoreError::NotFound(_))));
    assert!(matches!(
        store.update(id, &updated).await,
        Err(StoreError::NotFound(_))
    ));

    for p in store.search(&all_mine, Pagination::new(1, 100)).await? {
        store.delete(p.id).await?;
    }
    Ok(())
}
