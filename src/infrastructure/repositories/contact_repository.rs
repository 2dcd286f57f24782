//! SeaORM implementation of ContactRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryOrder, Set,
    TransactionTrait,
};

use crate::domain::{Contact, ContactRepository, DomainError, NewContact};
use crate::models::contact::{ActiveModel, Column, Entity as ContactEntity};

/// SeaORM-based implementation of ContactRepository
pub struct SeaOrmContactRepository {
    db: DatabaseConnection,
}

impl SeaOrmContactRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn new_active_model(contact: NewContact) -> ActiveModel {
    ActiveModel {
        name: Set(contact.name),
        document: Set(contact.document),
        email: Set(contact.email),
        birthdate: Set(contact.birthdate),
        ..Default::default()
    }
}

async fn insert<C: ConnectionTrait>(conn: &C, contact: NewContact) -> Result<Contact, DomainError> {
    let model = new_active_model(contact).insert(conn).await?;
    Ok(Contact::from(model))
}

#[async_trait]
impl ContactRepository for SeaOrmContactRepository {
    async fn find_all(&self) -> Result<Vec<Contact>, DomainError> {
        let contacts = ContactEntity::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;

        Ok(contacts.into_iter().map(Contact::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Contact>, DomainError> {
        let contact = ContactEntity::find_by_id(id).one(&self.db).await?;
        Ok(contact.map(Contact::from))
    }

    async fn save(&self, contact: NewContact) -> Result<Contact, DomainError> {
        insert(&self.db, contact).await
    }

    async fn save_all(&self, contacts: Vec<NewContact>) -> Result<Vec<Contact>, DomainError> {
        let txn = self.db.begin().await?;

        let mut saved = Vec::with_capacity(contacts.len());
        for contact in contacts {
            // Dropping the transaction on error rolls back earlier inserts
            saved.push(insert(&txn, contact).await?);
        }

        txn.commit().await?;
        Ok(saved)
    }

    async fn update(&self, id: i64, contact: NewContact) -> Result<Contact, DomainError> {
        let existing = ContactEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active_model: ActiveModel = existing.into();
        active_model.name = Set(contact.name);
        active_model.document = Set(contact.document);
        active_model.email = Set(contact.email);
        active_model.birthdate = Set(contact.birthdate);

        let model = active_model.update(&self.db).await?;
        Ok(Contact::from(model))
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        let result = ContactEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }
}
