use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{FolioError, Result};
use crate::router::PageId;
use crate::timer::MountId;

use super::{Page, PageLifecycleEvent};

/// Factory responsible for creating a fresh page instance per mount.
pub type PageFactory = Arc<dyn Fn() -> Box<dyn Page> + Send + Sync>;

/// Declarative page definition registered with the [`PageManager`].
pub struct PageDefinition {
    pub id: PageId,
    pub title: String,
    pub factory: PageFactory,
    pub metadata: PageMetadata,
}

impl PageDefinition {
    pub fn new(id: PageId, title: impl Into<String>, factory: PageFactory) -> Self {
        Self {
            id,
            title: title.into(),
            factory,
            metadata: PageMetadata::default(),
        }
    }

    pub fn with_metadata(mut self, metadata: PageMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Optional metadata carried alongside a page definition.
#[derive(Default, Clone, Debug)]
pub struct PageMetadata {
    pub description: Option<String>,
    pub shortcuts: Vec<String>,
}

struct ActivePage {
    id: PageId,
    mount: MountId,
    page: Box<dyn Page>,
}

/// Coordinates page registration, mounting and lifecycle delivery.
#[derive(Default)]
pub struct PageManager {
    pages: HashMap<PageId, PageDefinition>,
    active: Option<ActivePage>,
    last_mount: MountId,
}

impl PageManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the definition for `definition.id`.
    pub fn register_page(&mut self, definition: PageDefinition) {
        self.pages.insert(definition.id, definition);
    }

    pub fn definition(&self, id: PageId) -> Option<&PageDefinition> {
        self.pages.get(&id)
    }

    /// Replace the active page with a fresh instance of `id`.
    ///
    /// The new instance becomes active before any hook runs, so a failing
    /// hook still leaves the manager pointing at the requested page. Hooks run
    /// as: previous `WillDisappear`, next `WillAppear`, next `DidAppear`,
    /// previous `DidDisappear`.
    pub fn mount(&mut self, id: PageId) -> Result<MountId> {
        let definition = self
            .pages
            .get(&id)
            .ok_or(FolioError::PageNotRegistered(id))?;

        let page = (definition.factory)();
        self.last_mount += 1;
        let mount = self.last_mount;
        let mut previous = self.active.replace(ActivePage { id, mount, page });

        if let Some(old) = previous.as_mut() {
            old.page.on_lifecycle(PageLifecycleEvent::WillDisappear)?;
        }
        if let Some(active) = self.active.as_mut() {
            active.page.on_lifecycle(PageLifecycleEvent::WillAppear)?;
            active.page.on_lifecycle(PageLifecycleEvent::DidAppear)?;
        }
        if let Some(mut old) = previous {
            old.page.on_lifecycle(PageLifecycleEvent::DidDisappear)?;
        }

        Ok(mount)
    }

    /// Drop the active page, delivering its disappear hooks.
    pub fn unmount(&mut self) -> Result<Option<MountId>> {
        let Some(mut old) = self.active.take() else {
            return Ok(None);
        };
        old.page.on_lifecycle(PageLifecycleEvent::WillDisappear)?;
        old.page.on_lifecycle(PageLifecycleEvent::DidDisappear)?;
        Ok(Some(old.mount))
    }

    pub fn active_id(&self) -> Option<PageId> {
        self.active.as_ref().map(|active| active.id)
    }

    pub fn active_mount(&self) -> Option<MountId> {
        self.active.as_ref().map(|active| active.mount)
    }

    pub fn active_page(&self) -> Option<&dyn Page> {
        self.active.as_ref().map(|active| active.page.as_ref())
    }

    pub fn active_page_mut(&mut self) -> Option<&mut (dyn Page + 'static)> {
        self.active.as_mut().map(|active| active.page.as_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PageResult;
    use crate::geometry::Size;
    use crate::pages::PageView;
    use std::sync::Mutex;

    type Journal = Arc<Mutex<Vec<(PageId, PageLifecycleEvent)>>>;

    struct Recorder {
        id: PageId,
        journal: Journal,
    }

    impl Page for Recorder {
        fn id(&self) -> PageId {
            self.id
        }

        fn render(&self, _area: Size) -> PageResult<PageView> {
            Ok(PageView::new())
        }

        fn on_lifecycle(&mut self, event: PageLifecycleEvent) -> PageResult<()> {
            self.journal.lock().unwrap().push((self.id, event));
            Ok(())
        }
    }

    fn recorder(id: PageId, journal: &Journal) -> PageDefinition {
        let journal = journal.clone();
        PageDefinition::new(
            id,
            id.as_str(),
            Arc::new(move || {
                Box::new(Recorder {
                    id,
                    journal: journal.clone(),
                }) as Box<dyn Page>
            }),
        )
    }

    #[test]
    fn mount_orders_lifecycle_hooks() {
        let journal: Journal = Arc::default();
        let mut manager = PageManager::new();
        manager.register_page(recorder(PageId::Home, &journal));
        manager.register_page(recorder(PageId::Skills, &journal));

        let first = manager.mount(PageId::Home).expect("mount home");
        let second = manager.mount(PageId::Skills).expect("mount skills");
        assert!(second > first);
        assert_eq!(manager.active_id(), Some(PageId::Skills));
        assert_eq!(manager.active_mount(), Some(second));

        use PageLifecycleEvent::*;
        assert_eq!(
            *journal.lock().unwrap(),
            vec![
                (PageId::Home, WillAppear),
                (PageId::Home, DidAppear),
                (PageId::Home, WillDisappear),
                (PageId::Skills, WillAppear),
                (PageId::Skills, DidAppear),
                (PageId::Home, DidDisappear),
            ]
        );
    }

    #[test]
    fn unregistered_page_is_an_error() {
        let mut manager = PageManager::new();
        let err = manager.mount(PageId::Contact).unwrap_err();
        assert!(matches!(err, FolioError::PageNotRegistered(PageId::Contact)));
        assert!(manager.active_id().is_none());
    }

    #[test]
    fn unmount_clears_active_page() {
        let journal: Journal = Arc::default();
        let mut manager = PageManager::new();
        manager.register_page(recorder(PageId::Home, &journal));
        let mount = manager.mount(PageId::Home).unwrap();
        assert_eq!(manager.unmount().unwrap(), Some(mount));
        assert_eq!(manager.unmount().unwrap(), None);
        assert!(manager.active_page().is_none());
    }
}
