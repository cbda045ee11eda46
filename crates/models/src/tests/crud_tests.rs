use crate::db::connect;
use crate::{category, favourite_post, post, property, user, SoftDelete};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set};
use anyhow::Result;
use migration::MigratorTrait;
use chrono::Utc;
use uuid::Uuid;

/// Connect and migrate, or `None` when no database is available
async fn setup_test_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let db = match connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return None;
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {}", e);
        return None;
    }
    Some(db)
}

/// Test category + property CRUD including the tombstone columns
#[tokio::test]
async fn test_category_property_crud() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let name = format!("model_category_{}", Uuid::new_v4());
    let mut am = category::Model::draft(&name, None).into_active_model().reset_all();
    am.id = sea_orm::ActiveValue::NotSet;
    let created = am.insert(&db).await?;
    assert!(created.id > 0);
    assert_eq!(created.name, name);
    assert!(!created.is_deleted);

    let mut prop_am = property::Model::draft("Color", created.id).into_active_model().reset_all();
    prop_am.id = sea_orm::ActiveValue::NotSet;
    let prop = prop_am.insert(&db).await?;
    assert_eq!(prop.category_id, created.id);

    // Tombstone keeps the row
    let mut tomb = created.clone();
    tomb.mark_deleted(Utc::now().into());
    let tomb = tomb.into_active_model().reset_all().update(&db).await?;
    assert!(tomb.is_deleted);
    let found = category::Entity::find_by_id(created.id).one(&db).await?;
    assert!(found.map(|c| c.is_deleted).unwrap_or(false));

    property::Entity::delete_by_id(prop.id).exec(&db).await?;
    category::Entity::delete_by_id(created.id).exec(&db).await?;
    Ok(())
}

/// Test favourites join their posts and skip tombstoned links
#[tokio::test]
async fn test_favourites_for_user() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };
    let now = Utc::now();

    let u = user::ActiveModel {
        first_name: Set("Ann".into()),
        last_name: Set("Lee".into()),
        email: Set(format!("fav_{}@example.com", Uuid::new_v4())),
        phone: Set(None),
        is_deleted: Set(false),
        created_at: Set(now.into()),
        updated_at: Set(None),
        deleted_at: Set(None),
        ..Default::default()
    }
    .insert(&db)
    .await?;

    let mut cat_am = category::Model::draft(&format!("fav_category_{}", Uuid::new_v4()), None)
        .into_active_model()
        .reset_all();
    cat_am.id = sea_orm::ActiveValue::NotSet;
    let cat = cat_am.insert(&db).await?;

    let mut post_ids = vec![];
    for title in ["Bike", "Lamp", "Desk"] {
        let p = post::ActiveModel {
            title: Set(title.into()),
            description: Set(format!("{} for sale", title)),
            price: Set(10.0),
            user_id: Set(u.id),
            category_id: Set(cat.id),
            // Desk is withdrawn; its favourite stays live
            is_deleted: Set(title == "Desk"),
            created_at: Set(now.into()),
            updated_at: Set(None),
            deleted_at: Set(None),
            ..Default::default()
        }
        .insert(&db)
        .await?;
        post_ids.push(p.id);
    }

    for (i, post_id) in post_ids.iter().enumerate() {
        favourite_post::ActiveModel {
            user_id: Set(u.id),
            post_id: Set(*post_id),
            is_deleted: Set(i == 1),
            created_at: Set(now.into()),
            updated_at: Set(None),
            deleted_at: Set(None),
            ..Default::default()
        }
        .insert(&db)
        .await?;
    }

    let favs = favourite_post::find_for_user(&db, u.id).await?;
    assert_eq!(favs.len(), 1);
    assert_eq!(favs[0].1.title, "Bike");
    assert_eq!(favs[0].0.post_id, post_ids[0]);

    // Cascades remove posts and favourites
    user::Entity::delete_by_id(u.id).exec(&db).await?;
    category::Entity::delete_by_id(cat.id).exec(&db).await?;
    Ok(())
}

#[test]
fn models_serialize_with_snake_case_fields() {
    let c = category::Model::draft("Electronics", Some(3));
    let json = serde_json::to_value(&c).unwrap();
    assert_eq!(json["name"], "Electronics");
    assert_eq!(json["parent_id"], 3);
    assert_eq!(json["is_deleted"], false);
}
