//! Portfolio project listings: seeding, admin edits and view counting.

use chrono::Utc;
use rand::Rng;

use crate::error::{CatalogError, FieldErrors};
use crate::models::Project;
use crate::store::{Storage, StorageExt, keys};

pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=400&width=600";
const GALLERY_PLACEHOLDER: &str = "/placeholder.svg?height=300&width=500";

/// Editable project fields as typed into the admin form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectForm {
    pub title: String,
    pub description: String,
    pub long_description: String,
    pub image: String,
    pub additional_images: Vec<String>,
    pub technologies: Vec<String>,
    pub github_url: String,
    pub live_url: String,
}

impl ProjectForm {
    pub fn from_project(project: &Project) -> Self {
        Self {
            title: project.title.clone(),
            description: project.description.clone(),
            long_description: project.long_description.clone(),
            image: project.image.clone(),
            additional_images: project.additional_images.clone(),
            technologies: project.technologies.clone(),
            github_url: project.github_url.clone(),
            live_url: project.live_url.clone(),
        }
    }

    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.title.trim().is_empty() {
            errors.insert("title", "Title is required");
        }
        if self.description.trim().is_empty() {
            errors.insert("description", "Description is required");
        }
        if self.github_url.trim().is_empty() {
            errors.insert("githubUrl", "GitHub URL is required");
        }
        if self.live_url.trim().is_empty() {
            errors.insert("liveUrl", "Live URL is required");
        }
        errors
    }

    fn into_project(self, id: String, views: u64) -> Project {
        let description = self.description.trim().to_string();
        let long_description = match self.long_description.trim() {
            "" => description.clone(),
            text => text.to_string(),
        };
        let image = match self.image.trim() {
            "" => PLACEHOLDER_IMAGE.to_string(),
            url => url.to_string(),
        };

        Project {
            id,
            title: self.title.trim().to_string(),
            description,
            long_description,
            image,
            additional_images: self.additional_images,
            technologies: self.technologies,
            github_url: self.github_url.trim().to_string(),
            live_url: self.live_url.trim().to_string(),
            views,
        }
    }
}

/// Split a comma-separated form value into trimmed, non-empty entries.
pub fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogStats {
    pub total_projects: usize,
    pub total_views: u64,
    pub average_views: u64,
}

/// Owns the in-memory project list and writes it back whole on every change.
pub struct ProjectCatalog<S: Storage> {
    store: S,
    projects: Vec<Project>,
}

impl<S: Storage> ProjectCatalog<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            projects: Vec::new(),
        }
    }

    /// Construct and [`load`](Self::load) in one step.
    pub fn open(store: S) -> Result<Self, CatalogError> {
        let mut catalog = Self::new(store);
        catalog.load()?;
        Ok(catalog)
    }

    /// Read the stored list, seeding the defaults when there is nothing usable.
    pub fn load(&mut self) -> Result<&[Project], CatalogError> {
        match self.store.read::<Vec<Project>>(keys::PROJECTS)? {
            Some(projects) if !projects.is_empty() => {
                self.projects = projects;
            }
            _ => {
                tracing::info!("no stored projects, seeding defaults");
                self.projects = default_projects();
                self.persist()?;
            }
        }
        Ok(&self.projects)
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn find(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn create(&mut self, form: ProjectForm) -> Result<&Project, CatalogError> {
        form.validate()
            .into_result()
            .map_err(CatalogError::Validation)?;

        let id = self.next_id();
        let views = rand::thread_rng().gen_range(1..=50);
        let project = form.into_project(id, views);
        tracing::info!(id = %project.id, title = %project.title, "project created");

        self.projects.push(project);
        self.persist()?;
        Ok(&self.projects[self.projects.len() - 1])
    }

    pub fn update(&mut self, id: &str, form: ProjectForm) -> Result<&Project, CatalogError> {
        form.validate()
            .into_result()
            .map_err(CatalogError::Validation)?;

        let index = self
            .position(id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        let views = self.projects[index].views;
        self.projects[index] = form.into_project(id.to_string(), views);
        tracing::info!(id, "project updated");

        self.persist()?;
        Ok(&self.projects[index])
    }

    /// Remove `id`. Returns whether anything was removed; unknown ids are a no-op.
    pub fn delete(&mut self, id: &str) -> Result<bool, CatalogError> {
        let before = self.projects.len();
        self.projects.retain(|p| p.id != id);
        if self.projects.len() == before {
            return Ok(false);
        }

        tracing::info!(id, "project deleted");
        self.persist()?;
        Ok(true)
    }

    /// Count one visit to the detail page. Every call counts.
    pub fn record_view(&mut self, id: &str) -> Result<u64, CatalogError> {
        let index = self
            .position(id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        self.projects[index].views += 1;
        let views = self.projects[index].views;
        tracing::debug!(id, views, "project view recorded");

        self.persist()?;
        Ok(views)
    }

    pub fn stats(&self) -> CatalogStats {
        let total_projects = self.projects.len();
        let total_views: u64 = self.projects.iter().map(|p| p.views).sum();
        let average_views = if total_projects > 0 {
            (total_views as f64 / total_projects as f64).round() as u64
        } else {
            0
        };

        CatalogStats {
            total_projects,
            total_views,
            average_views,
        }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.projects.iter().position(|p| p.id == id)
    }

    fn next_id(&self) -> String {
        let mut millis = Utc::now().timestamp_millis();
        loop {
            let id = format!("project-{}", millis);
            if self.find(&id).is_none() {
                return id;
            }
            millis += 1;
        }
    }

    fn persist(&self) -> Result<(), CatalogError> {
        self.store.write(keys::PROJECTS, &self.projects)?;
        Ok(())
    }
}

/// Showcase projects a fresh store starts with.
pub fn default_projects() -> Vec<Project> {
    let gallery = || vec![GALLERY_PLACEHOLDER.to_string(), GALLERY_PLACEHOLDER.to_string()];
    let tags = |list: &[&str]| list.iter().map(|t| t.to_string()).collect::<Vec<_>>();

    vec![
        Project {
            id: "ecommerce-platform".to_string(),
            title: "E-Commerce Platform".to_string(),
            description: "A full-featured online store with product management, cart, and checkout functionality.".to_string(),
            long_description: "This e-commerce platform provides businesses with everything they need to sell products online. Built with Next.js and a headless CMS, it features a responsive design, product filtering, user accounts, shopping cart, secure checkout with Stripe, and an admin dashboard for managing products and orders. The platform is optimized for performance and SEO, ensuring fast load times and good search engine visibility.".to_string(),
            image: PLACEHOLDER_IMAGE.to_string(),
            additional_images: gallery(),
            technologies: tags(&["Next.js", "TypeScript", "Tailwind CSS", "Stripe", "Prisma", "PostgreSQL"]),
            github_url: "https://github.com".to_string(),
            live_url: "https://example.com".to_string(),
            views: 45,
        },
        Project {
            id: "task-management".to_string(),
            title: "Task Management App".to_string(),
            description: "A collaborative task management application with real-time updates and team features.".to_string(),
            long_description: "This task management application helps teams organize their work efficiently. It includes features like task creation and assignment, due dates, priority levels, status tracking, and file attachments. The app supports team collaboration with shared workspaces, comments, and notifications. Built with React and Firebase, it provides real-time updates so team members always see the latest information. The intuitive drag-and-drop interface makes it easy to manage tasks and track progress.".to_string(),
            image: PLACEHOLDER_IMAGE.to_string(),
            additional_images: gallery(),
            technologies: tags(&["React", "Firebase", "Tailwind CSS", "React DnD", "TypeScript"]),
            github_url: "https://github.com".to_string(),
            live_url: "https://example.com".to_string(),
            views: 32,
        },
        Project {
            id: "ai-content-generator".to_string(),
            title: "AI Content Generator".to_string(),
            description: "An AI-powered tool that helps create blog posts, social media content, and more.".to_string(),
            long_description: "This AI content generator helps content creators and marketers produce high-quality content quickly. Powered by OpenAI's GPT models, it can generate blog posts, social media captions, product descriptions, and more based on simple prompts. The application includes features like content editing, tone adjustment, and export options. Users can save templates for recurring content needs and collaborate with team members. The intuitive interface makes it easy to generate, edit, and manage content all in one place.".to_string(),
            image: PLACEHOLDER_IMAGE.to_string(),
            additional_images: gallery(),
            technologies: tags(&["Next.js", "OpenAI API", "Tailwind CSS", "Vercel AI SDK", "MongoDB"]),
            github_url: "https://github.com".to_string(),
            live_url: "https://example.com".to_string(),
            views: 28,
        },
    ]
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::store::MemoryStore;

    fn form(title: &str) -> ProjectForm {
        ProjectForm {
            title: title.to_string(),
            description: "  Short blurb  ".to_string(),
            github_url: "https://github.com/me/repo".to_string(),
            live_url: "https://repo.example.com".to_string(),
            ..ProjectForm::default()
        }
    }

    #[test]
    fn load_seeds_three_defaults_into_empty_store() {
        let store = MemoryStore::new();
        let catalog = ProjectCatalog::open(&store).unwrap();

        let ids: Vec<&str> = catalog.projects().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["ecommerce-platform", "task-management", "ai-content-generator"]);
        assert!(store.get_item(keys::PROJECTS).unwrap().is_some());
    }

    #[test]
    fn load_reseeds_an_empty_array() {
        let store = MemoryStore::new();
        store.set_item(keys::PROJECTS, "[]").unwrap();

        let catalog = ProjectCatalog::open(&store).unwrap();
        assert_eq!(catalog.projects().len(), 3);
    }

    #[test]
    fn create_applies_defaults_and_trims() {
        let store = MemoryStore::new();
        let mut catalog = ProjectCatalog::open(&store).unwrap();

        let created = catalog.create(form("  Weather Bot ")).unwrap().clone();

        assert!(created.id.starts_with("project-"));
        assert_eq!(created.title, "Weather Bot");
        assert_eq!(created.description, "Short blurb");
        assert_eq!(created.long_description, "Short blurb");
        assert_eq!(created.image, PLACEHOLDER_IMAGE);
        assert!((1..=50).contains(&created.views));
        assert_eq!(catalog.projects().len(), 4);
    }

    #[test]
    fn create_rejects_blank_required_fields() {
        let store = MemoryStore::new();
        let mut catalog = ProjectCatalog::open(&store).unwrap();

        let err = catalog
            .create(ProjectForm {
                title: "   ".to_string(),
                ..ProjectForm::default()
            })
            .unwrap_err();

        assert_matches!(err, CatalogError::Validation(ref errors) if errors.len() == 4);
        if let CatalogError::Validation(errors) = err {
            assert_eq!(errors.get("title"), Some("Title is required"));
            assert_eq!(errors.get("liveUrl"), Some("Live URL is required"));
        }
        assert_eq!(catalog.projects().len(), 3);
    }

    #[test]
    fn ids_stay_unique_for_rapid_creates() {
        let store = MemoryStore::new();
        let mut catalog = ProjectCatalog::open(&store).unwrap();

        let first = catalog.create(form("One")).unwrap().id.clone();
        let second = catalog.create(form("Two")).unwrap().id.clone();

        assert_ne!(first, second);
    }

    #[test]
    fn update_keeps_views_and_position() {
        let store = MemoryStore::new();
        let mut catalog = ProjectCatalog::open(&store).unwrap();

        let mut edit = ProjectForm::from_project(catalog.find("task-management").unwrap());
        edit.title = "Task Board".to_string();
        catalog.update("task-management", edit).unwrap();

        let updated = &catalog.projects()[1];
        assert_eq!(updated.id, "task-management");
        assert_eq!(updated.title, "Task Board");
        assert_eq!(updated.views, 32);
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let store = MemoryStore::new();
        let mut catalog = ProjectCatalog::open(&store).unwrap();

        let err = catalog.update("ghost", form("Ghost")).unwrap_err();
        assert_matches!(err, CatalogError::NotFound(id) if id == "ghost");
    }

    #[test]
    fn delete_unknown_id_is_a_no_op() {
        let store = MemoryStore::new();
        let mut catalog = ProjectCatalog::open(&store).unwrap();

        assert!(!catalog.delete("ghost").unwrap());
        assert!(catalog.delete("task-management").unwrap());
        assert_eq!(catalog.projects().len(), 2);
    }

    #[test]
    fn stats_round_the_average() {
        let store = MemoryStore::new();
        let catalog = ProjectCatalog::open(&store).unwrap();

        assert_eq!(
            catalog.stats(),
            CatalogStats {
                total_projects: 3,
                total_views: 105,
                average_views: 35,
            }
        );
    }

    #[test]
    fn parse_list_drops_blanks() {
        assert_eq!(parse_list(" Rust, ,Tokio ,, "), vec!["Rust", "Tokio"]);
        assert!(parse_list("").is_empty());
    }
}
