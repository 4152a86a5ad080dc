use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use tui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};

use portfolio_admin::{
    analytics::AnalyticsDashboard,
    auth::SessionGate,
    catalog::ProjectCatalog,
    config, logging,
    error::{AuthError, CatalogError},
    purchases::record_purchase,
    review::SubmissionsReview,
    store::JsonFileStore,
    ui::{
        analytics::{render_analytics, handle_input as handle_analytics_input, AnalyticsAction, AnalyticsState},
        components::popup::render_error,
        inquiry_wizard::{render_inquiry_wizard, handle_input as handle_inquiry_input, InquiryAction, InquiryWizardState},
        login::{render_login, handle_input as handle_login_input, LoginAction, LoginState},
        project_detail::{render_project_detail, handle_input as handle_detail_input, ProjectDetailAction, ProjectDetailState},
        project_wizard::{render_project_wizard, handle_input as handle_project_wizard_input, ProjectWizardAction, ProjectWizardState},
        projects::{render_projects, handle_input as handle_projects_input, ProjectAction, ProjectsState},
        settings::{render_settings, handle_input as handle_settings_input, SettingsAction, SettingsState},
        submissions::{render_submissions, handle_input as handle_submissions_input, SubmissionsAction, SubmissionsState},
    },
};

/// How long to wait for a key before letting timers run.
const TICK_RATE: Duration = Duration::from_millis(250);

type Store = Rc<JsonFileStore>;

#[derive(Parser)]
#[command(name = "portfolio-admin", version, about = "Manage a portfolio site's projects and client inquiries")]
struct Cli {
    /// JSON data file (overrides PORTFOLIO_DATA_FILE)
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    /// Log file (overrides PORTFOLIO_LOG_FILE)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the admin console (default)
    Console,
    /// Open the hire-me inquiry form
    Hire,
    /// Print one project and count the view
    Show { id: String },
    /// List all projects
    Projects,
}

// Represents the current screen in the app
#[derive(Clone, Copy, PartialEq, Eq)]
enum AppScreen {
    Login,
    Dashboard,
    ProjectWizard,
    ProjectDetail,
    InquiryWizard,
    Submissions,
    Analytics,
    Settings,
}

// Main application state
struct AppState {
    store: Store,
    catalog: ProjectCatalog<Store>,
    gate: SessionGate<Store>,
    screen: AppScreen,
    /// Opened straight into the hire form; closing it quits.
    hire_only: bool,
    error: Option<String>,
    login_state: Option<LoginState>,
    projects_state: Option<ProjectsState>,
    project_wizard_state: Option<ProjectWizardState>,
    project_detail_state: Option<ProjectDetailState>,
    inquiry_state: Option<InquiryWizardState<Store>>,
    submissions_state: Option<SubmissionsState<Store>>,
    analytics_state: Option<AnalyticsState>,
    settings_state: Option<SettingsState>,
}

impl AppState {
    fn new(store: Store, hire_only: bool) -> Self {
        Self {
            catalog: ProjectCatalog::new(store.clone()),
            gate: SessionGate::new(store.clone()),
            store,
            screen: AppScreen::Login,
            hire_only,
            error: None,
            login_state: None,
            projects_state: None,
            project_wizard_state: None,
            project_detail_state: None,
            inquiry_state: None,
            submissions_state: None,
            analytics_state: None,
            settings_state: None,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::init()?.with_overrides(cli.data_file, cli.log_file);
    logging::init(&config)?;
    tracing::info!(data_file = %config.data_file.display(), "starting portfolio admin");

    let store: Store = Rc::new(JsonFileStore::new(config.data_file.clone()));

    match cli.command.unwrap_or(Command::Console) {
        Command::Projects => list_projects(store),
        Command::Show { id } => show_project(store, &id),
        Command::Console => run_console(store, false),
        Command::Hire => run_console(store, true),
    }
}

fn list_projects(store: Store) -> Result<()> {
    let catalog = ProjectCatalog::open(store)?;
    for project in catalog.projects() {
        println!("{}\t{}\t{} views", project.id, project.title, project.views);
    }

    let stats = catalog.stats();
    println!(
        "{} projects, {} views, {} on average",
        stats.total_projects, stats.total_views, stats.average_views
    );
    Ok(())
}

fn show_project(store: Store, id: &str) -> Result<()> {
    let mut catalog = ProjectCatalog::open(store)?;
    match catalog.record_view(id) {
        Ok(_) => {}
        Err(CatalogError::NotFound(_)) => {
            println!("Project not found");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    }

    if let Some(project) = catalog.find(id) {
        println!("{}", project.title);
        println!("{}", project.description);
        if !project.long_description.is_empty() {
            println!();
            println!("{}", project.long_description);
        }
        println!();
        println!("Technologies: {}", project.technologies.join(", "));
        println!("GitHub:       {}", project.github_url);
        println!("Live demo:    {}", project.live_url);
        println!("Views:        {}", project.views);
    }
    Ok(())
}

fn run_console(store: Store, hire_only: bool) -> Result<()> {
    let mut app_state = AppState::new(store, hire_only);

    // Pick the first screen before touching the terminal so startup errors print normally
    if hire_only {
        open_hire_form(&mut app_state);
    } else if app_state.gate.is_authenticated()? {
        load_dashboard(&mut app_state)?;
    } else {
        open_login(&mut app_state);
    }

    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the main app loop
    let result = run_app(&mut terminal, &mut app_state);

    // Restore terminal
    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!(error = %err, "console stopped");
        println!("Error: {}", err);
    }

    result
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app_state: &mut AppState) -> Result<()> {
    loop {
        terminal.draw(|f| render_app(f, app_state))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Any key dismisses the error popup
                if app_state.error.take().is_some() {
                    continue;
                }

                match handle_key(app_state, key.code) {
                    Ok(true) => break,
                    Ok(false) => {}
                    Err(err) => {
                        tracing::error!(error = %err, "action failed");
                        app_state.error = Some(format!("{:#}", err));
                    }
                }
            }
        }

        if app_state.screen == AppScreen::InquiryWizard {
            if let Some(state) = &mut app_state.inquiry_state {
                state.tick(Instant::now());
            }
        }
    }

    Ok(())
}

fn render_app<B: Backend>(f: &mut Frame<B>, app_state: &mut AppState) {
    match app_state.screen {
        AppScreen::Login => {
            if let Some(state) = &mut app_state.login_state {
                render_login(f, state);
            }
        }
        AppScreen::Dashboard => {
            if let Some(state) = &mut app_state.projects_state {
                render_projects(f, state);
            }
        }
        AppScreen::ProjectWizard => {
            if let Some(state) = &mut app_state.project_wizard_state {
                render_project_wizard(f, state);
            }
        }
        AppScreen::ProjectDetail => {
            if let Some(state) = &mut app_state.project_detail_state {
                render_project_detail(f, state);
            }
        }
        AppScreen::InquiryWizard => {
            if let Some(state) = &mut app_state.inquiry_state {
                render_inquiry_wizard(f, state);
            }
        }
        AppScreen::Submissions => {
            if let Some(state) = &mut app_state.submissions_state {
                render_submissions(f, state);
            }
        }
        AppScreen::Analytics => {
            if let Some(state) = &mut app_state.analytics_state {
                render_analytics(f, state);
            }
        }
        AppScreen::Settings => {
            if let Some(state) = &mut app_state.settings_state {
                render_settings(f, state);
            }
        }
    }

    if let Some(error) = &app_state.error {
        render_error(f, error);
    }
}

/// Route a key to the current screen. Returns true when the app should quit.
fn handle_key(app_state: &mut AppState, key: KeyCode) -> Result<bool> {
    match app_state.screen {
        AppScreen::Login => handle_login_screen(app_state, key),
        AppScreen::Dashboard => handle_dashboard_screen(app_state, key),
        AppScreen::ProjectWizard => handle_project_wizard_screen(app_state, key),
        AppScreen::ProjectDetail => handle_project_detail_screen(app_state, key),
        AppScreen::InquiryWizard => handle_inquiry_screen(app_state, key),
        AppScreen::Submissions => handle_submissions_screen(app_state, key),
        AppScreen::Analytics => handle_analytics_screen(app_state, key),
        AppScreen::Settings => handle_settings_screen(app_state, key),
    }
}

fn open_login(app_state: &mut AppState) {
    app_state.login_state = Some(LoginState::new());
    app_state.screen = AppScreen::Login;
}

fn open_hire_form(app_state: &mut AppState) {
    app_state.inquiry_state = Some(InquiryWizardState::new(app_state.store.clone()));
    app_state.screen = AppScreen::InquiryWizard;
}

fn load_dashboard(app_state: &mut AppState) -> Result<()> {
    // Reload so edits made elsewhere show up
    app_state.catalog.load()?;
    let submissions = SubmissionsReview::open(app_state.store.clone())?.inquiries().len();

    app_state.projects_state = Some(ProjectsState::new(
        app_state.catalog.projects().to_vec(),
        app_state.catalog.stats(),
        submissions,
    ));
    app_state.screen = AppScreen::Dashboard;
    Ok(())
}

fn handle_login_screen(app_state: &mut AppState, key: KeyCode) -> Result<bool> {
    let Some(state) = &mut app_state.login_state else {
        return Ok(false);
    };

    match handle_login_input(state, key) {
        Some(LoginAction::Quit) => return Ok(true),
        Some(LoginAction::Submit(password)) => match app_state.gate.login(&password) {
            Ok(()) => load_dashboard(app_state)?,
            Err(err @ AuthError::InvalidPassword) => state.set_error(err.to_string()),
            Err(err) => return Err(err.into()),
        },
        None => {}
    }

    Ok(false)
}

fn handle_dashboard_screen(app_state: &mut AppState, key: KeyCode) -> Result<bool> {
    let Some(state) = &mut app_state.projects_state else {
        return Ok(false);
    };

    match handle_projects_input(state, key) {
        Some(ProjectAction::Quit) => return Ok(true),
        Some(ProjectAction::Logout) => {
            app_state.gate.logout()?;
            open_login(app_state);
        }
        Some(ProjectAction::NewProject) => {
            app_state.project_wizard_state = Some(ProjectWizardState::new());
            app_state.screen = AppScreen::ProjectWizard;
        }
        Some(ProjectAction::EditProject(id)) => match app_state.catalog.find(&id) {
            Some(project) => {
                app_state.project_wizard_state = Some(ProjectWizardState::from_existing(project));
                app_state.screen = AppScreen::ProjectWizard;
            }
            None => app_state.error = Some(format!("Project {} no longer exists", id)),
        },
        Some(ProjectAction::DeleteProject(id)) => {
            app_state.catalog.delete(&id)?;
            load_dashboard(app_state)?;
        }
        Some(ProjectAction::ViewProject(id)) => {
            let project = match app_state.catalog.record_view(&id) {
                Ok(_) => app_state.catalog.find(&id).cloned(),
                Err(CatalogError::NotFound(_)) => None,
                Err(err) => return Err(err.into()),
            };
            app_state.project_detail_state = Some(ProjectDetailState::new(project));
            app_state.screen = AppScreen::ProjectDetail;
        }
        Some(ProjectAction::Submissions) => {
            let review = SubmissionsReview::open(app_state.store.clone())?;
            app_state.submissions_state = Some(SubmissionsState::new(review));
            app_state.screen = AppScreen::Submissions;
        }
        Some(ProjectAction::Analytics) => {
            let dashboard = AnalyticsDashboard::open(app_state.store.clone())?;
            let projects = app_state.catalog.projects();
            app_state.analytics_state = Some(AnalyticsState::new(
                dashboard.summary(projects),
                dashboard.metrics().to_vec(),
                projects,
            ));
            app_state.screen = AppScreen::Analytics;
        }
        Some(ProjectAction::Settings) => {
            app_state.settings_state = Some(SettingsState::new());
            app_state.screen = AppScreen::Settings;
        }
        Some(ProjectAction::HireMe) => open_hire_form(app_state),
        None => {}
    }

    Ok(false)
}

fn handle_project_wizard_screen(app_state: &mut AppState, key: KeyCode) -> Result<bool> {
    let Some(state) = &mut app_state.project_wizard_state else {
        return Ok(false);
    };

    match handle_project_wizard_input(state, key) {
        Some(ProjectWizardAction::Cancel) => load_dashboard(app_state)?,
        Some(ProjectWizardAction::Save { id, form }) => {
            let saved = match &id {
                Some(id) => app_state.catalog.update(id, form).map(|_| ()),
                None => app_state.catalog.create(form).map(|_| ()),
            };
            match saved {
                Ok(()) => load_dashboard(app_state)?,
                Err(CatalogError::Validation(errors)) => state.set_errors(errors),
                Err(err) => return Err(err.into()),
            }
        }
        None => {}
    }

    Ok(false)
}

fn handle_project_detail_screen(app_state: &mut AppState, key: KeyCode) -> Result<bool> {
    let Some(state) = &mut app_state.project_detail_state else {
        return Ok(false);
    };

    match handle_detail_input(state, key) {
        Some(ProjectDetailAction::Back) => load_dashboard(app_state)?,
        Some(ProjectDetailAction::Purchase(package)) => {
            let purchase = record_purchase(&app_state.store, package)?;
            state.set_message(format!(
                "Purchased {} for {}. Order {}.",
                purchase.plan, purchase.amount, purchase.id
            ));
        }
        None => {}
    }

    Ok(false)
}

fn handle_inquiry_screen(app_state: &mut AppState, key: KeyCode) -> Result<bool> {
    let Some(state) = &mut app_state.inquiry_state else {
        return Ok(false);
    };

    match handle_inquiry_input(state, key)? {
        Some(InquiryAction::Closed) if app_state.hire_only => return Ok(true),
        Some(InquiryAction::Closed) => load_dashboard(app_state)?,
        None => {}
    }

    Ok(false)
}

fn handle_submissions_screen(app_state: &mut AppState, key: KeyCode) -> Result<bool> {
    let Some(state) = &mut app_state.submissions_state else {
        return Ok(false);
    };

    match handle_submissions_input(state, key)? {
        Some(SubmissionsAction::Back) => load_dashboard(app_state)?,
        None => {}
    }

    Ok(false)
}

fn handle_analytics_screen(app_state: &mut AppState, key: KeyCode) -> Result<bool> {
    let Some(state) = &mut app_state.analytics_state else {
        return Ok(false);
    };

    match handle_analytics_input(state, key) {
        Some(AnalyticsAction::Back) => load_dashboard(app_state)?,
        None => {}
    }

    Ok(false)
}

fn handle_settings_screen(app_state: &mut AppState, key: KeyCode) -> Result<bool> {
    let Some(state) = &mut app_state.settings_state else {
        return Ok(false);
    };

    match handle_settings_input(state, key) {
        Some(SettingsAction::Back) => load_dashboard(app_state)?,
        Some(SettingsAction::ChangePassword {
            current,
            new,
            confirm,
        }) => match app_state.gate.change_password(&current, &new, &confirm) {
            Ok(()) => state.set_success("Password changed successfully"),
            Err(AuthError::Store(err)) => return Err(err.into()),
            Err(err) => state.set_error(err.to_string()),
        },
        Some(SettingsAction::ResetPassword) => {
            app_state.gate.reset_to_default()?;
            state.set_success("Password reset to the default");
        }
        None => {}
    }

    Ok(false)
}
