use std::sync::Arc;

use models::{
    PatchDocument, PointOfInterest, PointOfInterestForCreation, PointOfInterestForUpdate,
};
use tracing::{info, instrument, warn};

use crate::errors::ServiceError;
use crate::mail::MailService;
use crate::store::{find_city, find_city_mut, next_point_of_interest_id, CitiesDataStore};

pub const DELETED_SUBJECT: &str = "Point of interest deleted.";

/// CRUD over the points of interest nested in each city.
///
/// Every operation resolves the city first, then the point of interest, so a
/// missing city is always reported as not found before any payload problem.
pub struct PointOfInterestService {
    store: CitiesDataStore,
    mail: Arc<dyn MailService>,
}

impl PointOfInterestService {
    pub fn new(store: CitiesDataStore, mail: Arc<dyn MailService>) -> Self {
        Self { store, mail }
    }

    /// Points of interest of a city, in insertion order.
    pub async fn list(&self, city_id: i32) -> Result<Vec<PointOfInterest>, ServiceError> {
        let cities = self.store.read().await;
        let city = find_city(&cities, city_id).ok_or_else(|| ServiceError::city_not_found(city_id))?;
        Ok(city.points_of_interest.clone())
    }

    pub async fn get(&self, city_id: i32, point_of_interest_id: i32) -> Result<PointOfInterest, ServiceError> {
        let cities = self.store.read().await;
        let city = find_city(&cities, city_id).ok_or_else(|| ServiceError::city_not_found(city_id))?;
        city.point_of_interest(point_of_interest_id)
            .cloned()
            .ok_or_else(|| ServiceError::point_of_interest_not_found(city_id, point_of_interest_id))
    }

    /// Append a new point of interest. The id is one past the highest id in the whole store.
    #[instrument(skip(self, input))]
    pub async fn create(
        &self,
        city_id: i32,
        input: PointOfInterestForCreation,
    ) -> Result<PointOfInterest, ServiceError> {
        let mut cities = self.store.write().await;
        if find_city(&cities, city_id).is_none() {
            return Err(ServiceError::city_not_found(city_id));
        }
        input.validate()?;

        // scan and insert under the same write guard
        let id = next_point_of_interest_id(&cities);
        let created = PointOfInterest { id, name: input.name, description: input.description };
        let city = find_city_mut(&mut cities, city_id).ok_or_else(|| ServiceError::city_not_found(city_id))?;
        city.points_of_interest.push(created.clone());
        info!(event = "point_of_interest_created", city_id, id, "created point of interest");
        Ok(created)
    }

    /// Full replace of `name` and `description`; the id is kept.
    pub async fn update(
        &self,
        city_id: i32,
        point_of_interest_id: i32,
        input: PointOfInterestForUpdate,
    ) -> Result<(), ServiceError> {
        let mut cities = self.store.write().await;
        let city = find_city_mut(&mut cities, city_id).ok_or_else(|| ServiceError::city_not_found(city_id))?;
        let stored = city
            .point_of_interest_mut(point_of_interest_id)
            .ok_or_else(|| ServiceError::point_of_interest_not_found(city_id, point_of_interest_id))?;
        input.validate()?;
        stored.apply(input);
        info!(event = "point_of_interest_updated", city_id, id = point_of_interest_id, "replaced point of interest");
        Ok(())
    }

    /// Apply `patch` to a staging copy, validate it, then commit both fields at once.
    /// On any failure the stored entity is left as it was.
    pub async fn partially_update(
        &self,
        city_id: i32,
        point_of_interest_id: i32,
        patch: PatchDocument,
    ) -> Result<(), ServiceError> {
        let mut cities = self.store.write().await;
        let city = find_city_mut(&mut cities, city_id).ok_or_else(|| ServiceError::city_not_found(city_id))?;
        let stored = city
            .point_of_interest_mut(point_of_interest_id)
            .ok_or_else(|| ServiceError::point_of_interest_not_found(city_id, point_of_interest_id))?;

        let mut staging = PointOfInterestForUpdate::from(&*stored);
        patch.apply_to(&mut staging)?;
        staging.validate()?;

        stored.apply(staging);
        info!(
            event = "point_of_interest_patched",
            city_id,
            id = point_of_interest_id,
            operations = patch.operations().len(),
            "patched point of interest"
        );
        Ok(())
    }

    /// Remove the point of interest and send a deletion notice in the background.
    pub async fn delete(&self, city_id: i32, point_of_interest_id: i32) -> Result<(), ServiceError> {
        let removed = {
            let mut cities = self.store.write().await;
            let city = find_city_mut(&mut cities, city_id).ok_or_else(|| ServiceError::city_not_found(city_id))?;
            city.remove_point_of_interest(point_of_interest_id)
                .ok_or_else(|| ServiceError::point_of_interest_not_found(city_id, point_of_interest_id))?
        };
        info!(event = "point_of_interest_deleted", city_id, id = removed.id, "deleted point of interest");
        self.notify_deleted(&removed);
        Ok(())
    }

    fn notify_deleted(&self, removed: &PointOfInterest) {
        let mail = Arc::clone(&self.mail);
        let message = format!("Point of interest {} with id {} was deleted", removed.name, removed.id);
        let id = removed.id;
        tokio::spawn(async move {
            if let Err(e) = mail.send(DELETED_SUBJECT, &message).await {
                warn!(event = "deletion_notice_failed", id, error = %e, "could not send deletion notice");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{recv_mail, ChannelMailService, FailingMailService};
    use models::PatchOperation;
    use serde_json::json;

    fn service() -> (PointOfInterestService, tokio::sync::mpsc::UnboundedReceiver<(String, String)>) {
        let (mail, rx) = ChannelMailService::new();
        (PointOfInterestService::new(CitiesDataStore::seeded(), Arc::new(mail)), rx)
    }

    fn create_input(name: &str) -> PointOfInterestForCreation {
        PointOfInterestForCreation { name: name.into(), description: None }
    }

    #[tokio::test]
    async fn list_returns_city_points_in_order() -> anyhow::Result<()> {
        let (svc, _rx) = service();
        let names: Vec<String> = svc.list(1).await?.into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Central Park", "Empire State Building"]);
        Ok(())
    }

    #[tokio::test]
    async fn every_operation_reports_missing_city() {
        let (svc, _rx) = service();
        let update = PointOfInterestForUpdate { name: "x".into(), description: None };
        assert!(matches!(svc.list(99).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.get(99, 1).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.create(99, create_input("x")).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.update(99, 1, update).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.partially_update(99, 1, PatchDocument::default()).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete(99, 1).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn get_is_scoped_to_the_city() {
        let (svc, _rx) = service();
        assert!(svc.get(1, 2).await.is_ok());
        // id 3 exists, but belongs to Antwerp
        assert!(matches!(svc.get(1, 3).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn create_uses_global_max_plus_one() -> anyhow::Result<()> {
        let (svc, _rx) = service();
        let created = svc.create(1, create_input("Statue of Liberty")).await?;
        assert_eq!(created.id, 7);

        let list = svc.list(1).await?;
        assert_eq!(list.len(), 3);
        assert_eq!(list.last(), Some(&created));

        let second = svc.create(3, create_input("Notre Dame")).await?;
        assert_eq!(second.id, 8);
        assert_eq!(svc.get(3, 8).await?, second);
        Ok(())
    }

    #[tokio::test]
    async fn create_rejects_blank_name() {
        let (svc, _rx) = service();
        let err = svc.create(1, create_input(" ")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(svc.list(1).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn concurrent_creates_get_distinct_ids() -> anyhow::Result<()> {
        let (svc, _rx) = service();
        let svc = Arc::new(svc);
        let handles: Vec<_> = (0..10)
            .map(|i| {
                let svc = Arc::clone(&svc);
                tokio::spawn(async move { svc.create(1 + i % 3, create_input("parallel")).await })
            })
            .collect();
        let mut ids = Vec::new();
        for h in handles {
            ids.push(h.await??.id);
        }
        ids.sort_unstable();
        assert_eq!(ids, (7..17).collect::<Vec<_>>());
        Ok(())
    }

    #[tokio::test]
    async fn update_overwrites_fields_and_keeps_id() -> anyhow::Result<()> {
        let (svc, _rx) = service();
        svc.update(2, 4, PointOfInterestForUpdate { name: "Centraal".into(), description: None }).await?;
        let poi = svc.get(2, 4).await?;
        assert_eq!(poi, PointOfInterest::new(4, "Centraal", None));
        Ok(())
    }

    #[tokio::test]
    async fn update_rejects_blank_name_without_mutation() -> anyhow::Result<()> {
        let (svc, _rx) = service();
        let before = svc.get(2, 4).await?;
        let err = svc
            .update(2, 4, PointOfInterestForUpdate { name: "".into(), description: None })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(svc.get(2, 4).await?, before);
        Ok(())
    }

    #[tokio::test]
    async fn update_missing_point_is_not_found() {
        let (svc, _rx) = service();
        let input = PointOfInterestForUpdate { name: "x".into(), description: None };
        assert!(matches!(svc.update(1, 5, input).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn patch_description_only_leaves_name() -> anyhow::Result<()> {
        let (svc, _rx) = service();
        let patch = PatchDocument::new(vec![PatchOperation::replace("/description", "Updated")]);
        svc.partially_update(3, 6, patch).await?;
        let poi = svc.get(3, 6).await?;
        assert_eq!(poi.name, "The Louvre");
        assert_eq!(poi.description.as_deref(), Some("Updated"));
        Ok(())
    }

    #[tokio::test]
    async fn patch_name_only_leaves_description() -> anyhow::Result<()> {
        let (svc, _rx) = service();
        let before = svc.get(3, 5).await?;
        let patch = PatchDocument::new(vec![PatchOperation::replace("/name", "La Tour Eiffel")]);
        svc.partially_update(3, 5, patch).await?;
        let poi = svc.get(3, 5).await?;
        assert_eq!(poi.name, "La Tour Eiffel");
        assert_eq!(poi.description, before.description);
        Ok(())
    }

    #[tokio::test]
    async fn patch_to_empty_name_is_rejected_and_not_applied() -> anyhow::Result<()> {
        let (svc, _rx) = service();
        let before = svc.get(1, 1).await?;
        let patch: PatchDocument = serde_json::from_value(json!([
            { "op": "replace", "path": "/description", "value": "changed" },
            { "op": "replace", "path": "/name", "value": "" }
        ]))?;
        let err = svc.partially_update(1, 1, patch).await.unwrap_err();
        match err {
            ServiceError::Validation(errors) => assert!(errors.field("name").is_some()),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(svc.get(1, 1).await?, before);
        Ok(())
    }

    #[tokio::test]
    async fn patch_with_bad_path_is_rejected() -> anyhow::Result<()> {
        let (svc, _rx) = service();
        let before = svc.get(1, 1).await?;
        let patch = PatchDocument::new(vec![
            PatchOperation::replace("/name", "Renamed"),
            PatchOperation::replace("/rating", 5),
        ]);
        assert!(matches!(svc.partially_update(1, 1, patch).await, Err(ServiceError::Validation(_))));
        assert_eq!(svc.get(1, 1).await?, before);
        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_and_notifies_once() -> anyhow::Result<()> {
        let (svc, mut rx) = service();
        svc.delete(1, 2).await?;
        assert!(matches!(svc.get(1, 2).await, Err(ServiceError::NotFound(_))));
        assert_eq!(svc.list(1).await?.len(), 1);

        let (subject, message) = recv_mail(&mut rx).await.expect("deletion notice");
        assert_eq!(subject, DELETED_SUBJECT);
        assert!(message.contains("Empire State Building"));
        assert!(message.contains("id 2"));
        assert!(recv_mail(&mut rx).await.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn delete_missing_point_sends_nothing() {
        let (svc, mut rx) = service();
        assert!(matches!(svc.delete(1, 6).await, Err(ServiceError::NotFound(_))));
        assert!(recv_mail(&mut rx).await.is_none());
    }

    #[tokio::test]
    async fn mail_failure_does_not_fail_delete() -> anyhow::Result<()> {
        let svc = PointOfInterestService::new(CitiesDataStore::seeded(), Arc::new(FailingMailService));
        svc.delete(2, 3).await?;
        assert!(matches!(svc.get(2, 3).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
