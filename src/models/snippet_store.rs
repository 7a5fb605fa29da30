use crate::error::{Error, Result, StorageError};
use crate::models::snippet::{Snippet, SnippetDraft, StoredSnippet};
use crate::models::storage::KeyValueStore;
use uuid::Uuid;

/// Key the whole collection lives under
pub const SNIPPETS_KEY: &str = "prompts";

/// What a delete should remove.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnippetMatch {
    /// The snippet with this id
    Id(Uuid),
    /// The first snippet whose title and text are both equal
    Content { title: String, text: String },
}

impl SnippetMatch {
    pub fn content(title: impl Into<String>, text: impl Into<String>) -> Self {
        SnippetMatch::Content {
            title: title.into(),
            text: text.into(),
        }
    }

    fn position_in(&self, snippets: &[Snippet]) -> Option<usize> {
        match self {
            SnippetMatch::Id(id) => snippets.iter().position(|s| s.id == *id),
            SnippetMatch::Content { title, text } => {
                snippets.iter().position(|s| s.same_content(title, text))
            }
        }
    }
}

/// Persisted snippet collection.
///
/// Nothing is cached between calls: every operation reads the full
/// collection from the backend, transforms it, and writes it back whole.
/// Two popups sharing a backend therefore always start from what is on disk,
/// but a write from one can still overwrite a concurrent write from the other.
#[derive(Debug)]
pub struct SnippetStore<S> {
    backend: S,
}

impl<S: KeyValueStore> SnippetStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Full ordered collection; empty when nothing was ever saved.
    ///
    /// Only a failed read is an error. If ids had to be assigned and writing
    /// them back fails, the snippets are still returned with the fresh ids.
    pub async fn list(&self) -> Result<Vec<Snippet>> {
        let (snippets, backfilled) = self.read().await?;
        if backfilled {
            tracing::info!(
                count = snippets.len(),
                "assigned ids to stored snippets that had none"
            );
            if let Err(error) = self.write(&snippets).await {
                tracing::warn!(%error, "could not persist assigned ids");
            }
        }
        Ok(snippets)
    }

    /// Appends a new snippet and returns the updated collection.
    pub async fn add(&self, draft: SnippetDraft) -> Result<Vec<Snippet>> {
        let draft = draft.validate()?;
        let (mut snippets, _) = self.read().await?;

        let snippet = Snippet::new(draft);
        tracing::info!(id = %snippet.id, title = %snippet.title, "adding snippet");
        snippets.push(snippet);

        self.write(&snippets).await?;
        Ok(snippets)
    }

    /// Replaces the contents of the snippet with `id`, keeping its id and position.
    pub async fn update(&self, id: Uuid, draft: SnippetDraft) -> Result<Vec<Snippet>> {
        let draft = draft.validate()?;
        let (mut snippets, _) = self.read().await?;

        let slot = snippets
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(Error::NotFound(id))?;
        slot.title = draft.title;
        slot.text = draft.text;
        slot.color = draft.color;
        tracing::info!(%id, "updated snippet");

        self.write(&snippets).await?;
        Ok(snippets)
    }

    /// Removes the first snippet matching `target`. A target that matches
    /// nothing leaves the collection untouched and writes nothing.
    pub async fn delete(&self, target: &SnippetMatch) -> Result<Vec<Snippet>> {
        let (mut snippets, backfilled) = self.read().await?;

        match target.position_in(&snippets) {
            Some(idx) => {
                let removed = snippets.remove(idx);
                tracing::info!(id = %removed.id, title = %removed.title, "deleted snippet");
                self.write(&snippets).await?;
            }
            None => {
                tracing::debug!(?target, "delete matched nothing");
                if backfilled {
                    self.write(&snippets).await?;
                }
            }
        }

        Ok(snippets)
    }

    async fn read(&self) -> Result<(Vec<Snippet>, bool)> {
        let Some(value) = self.backend.get(SNIPPETS_KEY).await? else {
            tracing::debug!("no stored snippets yet");
            return Ok((Vec::new(), false));
        };

        if value.is_null() {
            return Ok((Vec::new(), false));
        }

        let stored: Vec<StoredSnippet> =
            serde_json::from_value(value).map_err(StorageError::Serialization)?;

        let mut backfilled = false;
        let snippets = stored
            .into_iter()
            .map(|record| {
                let (snippet, assigned) = record.into_snippet();
                backfilled |= assigned;
                snippet
            })
            .collect::<Vec<_>>();

        tracing::debug!(count = snippets.len(), "read snippets");
        Ok((snippets, backfilled))
    }

    async fn write(&self, snippets: &[Snippet]) -> Result<()> {
        let value = serde_json::to_value(snippets).map_err(StorageError::Serialization)?;
        self.backend.set(SNIPPETS_KEY, value).await?;
        tracing::debug!(count = snippets.len(), "wrote snippets");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::models::storage::{JsonFileStore, MemoryStore};
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use tempfile::TempDir;

    fn draft(title: &str, text: &str, color: &str) -> SnippetDraft {
        SnippetDraft::new(title, text, color)
    }

    fn contents(snippets: &[Snippet]) -> Vec<(String, String, String)> {
        snippets
            .iter()
            .map(|s| (s.title.clone(), s.text.clone(), s.color.clone()))
            .collect()
    }

    #[tokio::test]
    async fn list_is_empty_when_key_absent() {
        let store = SnippetStore::new(MemoryStore::new());
        assert!(store.list().await.unwrap().is_empty());
        assert_eq!(store.backend().writes(), 0);
    }

    #[tokio::test]
    async fn add_appends_and_list_returns_it_last() {
        let store = SnippetStore::new(MemoryStore::new());
        store.add(draft("one", "first", "")).await.unwrap();
        let returned = store.add(draft("two", "second", "red")).await.unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed, returned);
        assert_eq!(
            contents(&listed),
            vec![
                ("one".into(), "first".into(), "".into()),
                ("two".into(), "second".into(), "red".into()),
            ]
        );
    }

    #[tokio::test]
    async fn add_rejects_empty_fields_without_writing() {
        let store = SnippetStore::new(MemoryStore::new());
        let err = store.add(draft(" ", "text", "")).await.unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::EmptyTitle)));
        let err = store.add(draft("title", "", "")).await.unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::EmptyText)));
        assert_eq!(store.backend().writes(), 0);
    }

    #[tokio::test]
    async fn update_replaces_in_place_and_keeps_id() {
        let store = SnippetStore::new(MemoryStore::new());
        store.add(draft("a", "1", "")).await.unwrap();
        let snippets = store.add(draft("b", "2", "")).await.unwrap();
        store.add(draft("c", "3", "")).await.unwrap();
        let target = snippets[1].id;

        let updated = store
            .update(target, draft("B", "two", "green"))
            .await
            .unwrap();

        assert_eq!(updated[1].id, target);
        assert_eq!(
            contents(&updated),
            vec![
                ("a".into(), "1".into(), "".into()),
                ("B".into(), "two".into(), "green".into()),
                ("c".into(), "3".into(), "".into()),
            ]
        );
    }

    #[tokio::test]
    async fn update_of_missing_id_is_not_found() {
        let store = SnippetStore::new(MemoryStore::new());
        store.add(draft("a", "1", "")).await.unwrap();
        let writes = store.backend().writes();

        let missing = Uuid::new_v4();
        let err = store.update(missing, draft("x", "y", "")).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(id) if id == missing));
        assert_eq!(store.backend().writes(), writes);
    }

    #[tokio::test]
    async fn update_sees_changes_made_by_another_handle() {
        let backend = std::sync::Arc::new(MemoryStore::new());
        let first = SnippetStore::new(backend.clone());
        let second = SnippetStore::new(backend.clone());

        let id = first.add(draft("a", "1", "")).await.unwrap()[0].id;
        second.delete(&SnippetMatch::Id(id)).await.unwrap();

        let err = first.update(id, draft("a", "2", "")).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_by_id_removes_only_that_snippet() {
        let store = SnippetStore::new(MemoryStore::new());
        store.add(draft("same", "text", "red")).await.unwrap();
        let snippets = store.add(draft("same", "text", "blue")).await.unwrap();

        let remaining = store.delete(&SnippetMatch::Id(snippets[1].id)).await.unwrap();
        assert_eq!(remaining, vec![snippets[0].clone()]);
    }

    #[tokio::test]
    async fn delete_by_content_removes_first_match_only() {
        let store = SnippetStore::new(MemoryStore::new());
        store.add(draft("same", "text", "red")).await.unwrap();
        let snippets = store.add(draft("same", "text", "blue")).await.unwrap();

        let remaining = store
            .delete(&SnippetMatch::content("same", "text"))
            .await
            .unwrap();
        assert_eq!(remaining, vec![snippets[1].clone()]);
        assert_eq!(store.list().await.unwrap(), remaining);
    }

    #[tokio::test]
    async fn delete_without_match_is_a_no_op() {
        let store = SnippetStore::new(MemoryStore::new());
        let before = store.add(draft("a", "1", "")).await.unwrap();
        let writes = store.backend().writes();

        let after = store
            .delete(&SnippetMatch::content("a", "different"))
            .await
            .unwrap();
        assert_eq!(after, before);
        let after = store.delete(&SnippetMatch::Id(Uuid::new_v4())).await.unwrap();
        assert_eq!(after, before);
        assert_eq!(store.backend().writes(), writes);
    }

    #[tokio::test]
    async fn every_operation_matches_the_pure_transformation() {
        let store = SnippetStore::new(MemoryStore::new());
        let mut model: Vec<Snippet> = Vec::new();

        for i in 0..6 {
            let observed = store.list().await.unwrap();
            assert_eq!(observed, model);
            let after = store
                .add(draft(&format!("t{i}"), &format!("body {i}"), ""))
                .await
                .unwrap();
            let mut expected = observed.clone();
            expected.push(after.last().unwrap().clone());
            assert_eq!(after, expected);
            model = after;
        }

        let observed = store.list().await.unwrap();
        let id = observed[2].id;
        let after = store.update(id, draft("new", "text", "yellow")).await.unwrap();
        let mut expected = observed.clone();
        expected[2].title = "new".into();
        expected[2].text = "text".into();
        expected[2].color = "yellow".into();
        assert_eq!(after, expected);

        let observed = store.list().await.unwrap();
        let after = store
            .delete(&SnippetMatch::content("t4", "body 4"))
            .await
            .unwrap();
        let expected: Vec<Snippet> = observed
            .iter()
            .filter(|s| s.title != "t4")
            .cloned()
            .collect();
        assert_eq!(after, expected);
        assert_eq!(store.list().await.unwrap(), expected);
    }

    #[tokio::test]
    async fn legacy_records_get_stable_ids() {
        let backend = MemoryStore::new();
        backend
            .seed(
                SNIPPETS_KEY,
                json!([
                    {"title": "old", "text": "record", "color": "red"},
                    {"title": "older", "text": "record"}
                ]),
            )
            .await;
        let store = SnippetStore::new(backend);

        let first = store.list().await.unwrap();
        let second = store.list().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first[1].color, "");
        assert_eq!(store.backend().writes(), 1);
    }

    #[tokio::test]
    async fn legacy_records_stay_readable_when_ids_cannot_be_saved() {
        let backend = MemoryStore::new();
        backend
            .seed(
                SNIPPETS_KEY,
                json!([{"title": "old", "text": "rec", "color": ""}]),
            )
            .await;
        backend.fail_writes(true);
        let store = SnippetStore::new(backend);

        let listed = store.list().await.unwrap();
        assert_eq!(
            contents(&listed),
            vec![("old".into(), "rec".into(), "".into())]
        );
        assert_eq!(store.backend().writes(), 0);

        store.backend().fail_writes(false);
        let first = store.list().await.unwrap();
        assert_eq!(store.backend().writes(), 1);
        assert_eq!(store.list().await.unwrap(), first);
    }

    #[tokio::test]
    async fn read_failure_surfaces_as_storage_error() {
        let store = SnippetStore::new(MemoryStore::new());
        store.backend().fail_reads(true);
        assert!(matches!(store.list().await, Err(Error::Storage(_))));
        assert!(matches!(
            store.add(draft("a", "b", "")).await,
            Err(Error::Storage(_))
        ));
    }

    #[tokio::test]
    async fn malformed_collection_is_a_storage_error() {
        let backend = MemoryStore::new();
        backend.seed(SNIPPETS_KEY, json!({"not": "a list"})).await;
        let store = SnippetStore::new(backend);
        assert!(matches!(store.list().await, Err(Error::Storage(_))));
    }

    #[tokio::test]
    async fn greeting_round_trip_on_disk() {
        let dir = TempDir::new().unwrap();
        let store = SnippetStore::new(JsonFileStore::in_data_dir(dir.path()));

        let added = store
            .add(draft("Greeting", "Hi {{name}}", "blue"))
            .await
            .unwrap();
        let listed = store.list().await.unwrap();
        assert_eq!(listed, added);
        assert_eq!(
            contents(&listed),
            vec![("Greeting".into(), "Hi {{name}}".into(), "blue".into())]
        );

        let raw: Value =
            serde_json::from_str(&std::fs::read_to_string(store.backend().path()).unwrap())
                .unwrap();
        assert_eq!(raw[SNIPPETS_KEY][0]["title"], json!("Greeting"));
        assert_eq!(raw[SNIPPETS_KEY][0]["color"], json!("blue"));

        let remaining = store.delete(&SnippetMatch::Id(added[0].id)).await.unwrap();
        assert!(remaining.is_empty());
        assert!(store.list().await.unwrap().is_empty());
    }
}
