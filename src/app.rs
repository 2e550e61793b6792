//! Main application state and egui integration.
//!
//! Owns the backends, routes between screens and runs sign-in requests.

use std::sync::Arc;

use anyhow::Context as _;
use crossbeam::channel::{unbounded, Receiver, Sender};
use eframe::egui;
use tokio::sync::watch;

use athletehub::athletes::AthleteGateway;
use athletehub::auth::{
    resolve_role, FirebaseAuth, IdentityProvider, Role, RoleResolution, Session,
};
use athletehub::context::AppContext;
use athletehub::enrichment::{EnrichmentGate, GeminiClient};
use athletehub::profile::ProfileManager;
use athletehub::storage::config::{get_data_dir, load_config};
use athletehub::storage::{AppConfig, LocalBlobStore, SqliteStore};
use athletehub::ui::screens::{
    AthleteDashboard, CoachDashboard, LoginAction, LoginScreen, ProfileScreen, Screen,
};
use athletehub::ui::{render_guarded, show_fallback, RenderError};

type Profiles = ProfileManager<SqliteStore, LocalBlobStore>;

/// Result of a background sign-in or sign-up.
enum AuthEvent {
    SignedIn {
        session: Session,
        resolution: RoleResolution,
    },
    Failed(String),
}

/// The mounted screen. Leaving a screen drops its state, which closes its
/// subscriptions and discards results of its in-flight calls.
enum ActiveScreen {
    Login(LoginScreen),
    Coach(CoachDashboard<SqliteStore, GeminiClient>),
    Athlete(AthleteDashboard<SqliteStore>),
    Profile(ProfileScreen<SqliteStore, LocalBlobStore>),
}

impl ActiveScreen {
    fn screen(&self) -> Screen {
        match self {
            ActiveScreen::Login(_) => Screen::Login,
            ActiveScreen::Coach(_) => Screen::CoachDashboard,
            ActiveScreen::Athlete(_) => Screen::AthleteDashboard,
            ActiveScreen::Profile(_) => Screen::Profile,
        }
    }

    fn show(&mut self, ui: &mut egui::Ui) -> Option<LoginAction> {
        match self {
            ActiveScreen::Login(screen) => return screen.show(ui),
            ActiveScreen::Coach(screen) => screen.show(ui),
            ActiveScreen::Athlete(screen) => screen.show(ui),
            ActiveScreen::Profile(screen) => screen.show(ui),
        }
        None
    }
}

/// Main application state.
pub struct AthleteHubApp {
    context: AppContext,
    store: Arc<SqliteStore>,
    auth: Arc<FirebaseAuth>,
    generator: Arc<GeminiClient>,
    gateway: AthleteGateway<SqliteStore>,
    profiles: Profiles,
    session_rx: watch::Receiver<Option<Session>>,
    active: ActiveScreen,
    render_error: Option<RenderError>,
    auth_tx: Sender<AuthEvent>,
    auth_rx: Receiver<AuthEvent>,
}

impl AthleteHubApp {
    /// Create a new application instance.
    pub fn new(cc: &eframe::CreationContext<'_>) -> anyhow::Result<Self> {
        let config = load_config().unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            AppConfig::with_system_theme(get_data_dir())
        });

        cc.egui_ctx.set_visuals(config.ui.theme.visuals());
        cc.egui_ctx.set_zoom_factor(config.ui.font_scale);

        let database_path = config.database_path();
        let store = Arc::new(
            SqliteStore::open(&database_path)
                .with_context(|| format!("opening {}", database_path.display()))?,
        );
        tracing::info!("Document store at {}", database_path.display());

        let blobs = Arc::new(LocalBlobStore::new(config.blob_dir()));
        let auth = Arc::new(FirebaseAuth::new(config.backend.firebase_api_key.clone()));
        let generator = Arc::new(GeminiClient::new(
            config.backend.gemini_api_key.clone(),
            config.backend.gemini_model.clone(),
        ));
        if !generator.is_configured() {
            tracing::warn!("No generative API key configured, AI reports will fail");
        }

        let gateway = AthleteGateway::new(Arc::clone(&store));
        let profiles = ProfileManager::new(Arc::clone(&store), blobs);
        let session_rx = auth.on_session_change();
        let (auth_tx, auth_rx) = unbounded();

        Ok(Self {
            context: AppContext::new(config),
            store,
            auth,
            generator,
            gateway,
            profiles,
            session_rx,
            active: ActiveScreen::Login(LoginScreen::new()),
            render_error: None,
            auth_tx,
            auth_rx,
        })
    }

    /// Mount a screen. Screens that need a user fall back to sign-in.
    fn navigate(&mut self, screen: Screen) {
        tracing::debug!("Navigating from {:?} to {:?}", self.active.screen(), screen);
        self.render_error = None;

        let Some(user) = self.context.user() else {
            self.active = ActiveScreen::Login(LoginScreen::new());
            return;
        };

        self.active = match screen {
            Screen::Login => ActiveScreen::Login(LoginScreen::new()),
            Screen::CoachDashboard => ActiveScreen::Coach(CoachDashboard::new(
                self.gateway.clone(),
                EnrichmentGate::new(Arc::clone(&self.generator)),
            )),
            Screen::AthleteDashboard => {
                ActiveScreen::Athlete(AthleteDashboard::new(self.gateway.clone()))
            }
            Screen::Profile => ActiveScreen::Profile(ProfileScreen::new(
                self.profiles.clone(),
                user.session.uid.clone(),
                user.session.email.clone(),
                user.role,
            )),
        };
    }

    fn home_screen(role: Role) -> Screen {
        match role {
            Role::Coach => Screen::CoachDashboard,
            Role::Athlete => Screen::AthleteDashboard,
        }
    }

    /// Run a login request in the background.
    fn dispatch_login(&self, ctx: &egui::Context, action: LoginAction) {
        let auth = Arc::clone(&self.auth);
        let store = Arc::clone(&self.store);
        let profiles = self.profiles.clone();
        let tx = self.auth_tx.clone();
        let ctx = ctx.clone();

        tokio::spawn(async move {
            let event = match run_login(&auth, &store, &profiles, action).await {
                Ok((session, resolution)) => AuthEvent::SignedIn {
                    session,
                    resolution,
                },
                Err(e) => {
                    tracing::warn!("Sign-in failed: {:#}", e);
                    AuthEvent::Failed(e.to_string())
                }
            };
            let _ = tx.send(event);
            ctx.request_repaint();
        });
    }

    /// Apply finished login requests and provider-side sign-outs.
    fn process_auth_events(&mut self) {
        while let Ok(event) = self.auth_rx.try_recv() {
            match event {
                AuthEvent::SignedIn {
                    session,
                    resolution: RoleResolution::Resolved(role),
                } => {
                    self.context.sign_in(session, role);
                    self.navigate(Self::home_screen(role));
                }
                AuthEvent::SignedIn {
                    resolution: RoleResolution::Unrecognized(role),
                    ..
                } => {
                    self.auth.sign_out();
                    if let ActiveScreen::Login(login) = &mut self.active {
                        login.fail(format!("Your account has an unknown role: {}", role));
                    }
                }
                AuthEvent::Failed(message) => {
                    if let ActiveScreen::Login(login) = &mut self.active {
                        login.fail(message);
                    }
                }
            }
        }

        if self.session_rx.has_changed().unwrap_or(false) {
            let signed_out = self.session_rx.borrow_and_update().is_none();
            if signed_out && self.context.user().is_some() {
                self.context.sign_out();
                self.navigate(Screen::Login);
            }
        }
    }

    fn sign_out(&mut self) {
        self.auth.sign_out();
        self.context.sign_out();
        self.navigate(Screen::Login);
    }

    fn toggle_theme(&mut self, ctx: &egui::Context) {
        if let Err(e) = self.context.toggle_theme() {
            tracing::warn!("Failed to save theme preference: {}", e);
        }
        ctx.set_visuals(self.context.theme().visuals());
    }
}

async fn run_login(
    auth: &FirebaseAuth,
    store: &SqliteStore,
    profiles: &Profiles,
    action: LoginAction,
) -> anyhow::Result<(Session, RoleResolution)> {
    match action {
        LoginAction::SignIn { email, password } => {
            let session = auth.sign_in(&email, &password).await?;
            let resolution = resolve_role(store, &session.uid).await?;
            Ok((session, resolution))
        }
        LoginAction::SignUp {
            name,
            email,
            password,
            role,
        } => {
            let session = auth.sign_up(&email, &password).await?;
            profiles.create(&session.uid, &name, &email, role).await?;
            Ok((session, RoleResolution::Resolved(role)))
        }
        LoginAction::Federated(provider) => {
            let session = auth.sign_in_federated(provider).await?;
            let resolution = resolve_role(store, &session.uid).await?;
            Ok((session, resolution))
        }
    }
}

impl eframe::App for AthleteHubApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_auth_events();

        // Top panel with navigation
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("AthleteHub");

                let current = self.active.screen();
                if let Some(role) = self.context.role() {
                    ui.separator();
                    let home = Self::home_screen(role);
                    if ui.selectable_label(current == home, "Dashboard").clicked()
                        && current != home
                    {
                        self.navigate(home);
                    }
                    if ui
                        .selectable_label(current == Screen::Profile, "Profile")
                        .clicked()
                        && current != Screen::Profile
                    {
                        self.navigate(Screen::Profile);
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button(self.context.theme().toggle_icon()).clicked() {
                        self.toggle_theme(ctx);
                    }

                    let email = self.context.user().map(|u| u.session.email.clone());
                    if let Some(email) = email {
                        if ui.button("Sign Out").clicked() {
                            self.sign_out();
                        }
                        ui.label(email);
                    }
                });
            });
        });

        // Main content area
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(error) = &self.render_error {
                if show_fallback(ui, error) {
                    let screen = self.active.screen();
                    self.navigate(screen);
                }
                return;
            }

            let name = self.active.screen().name();
            match render_guarded(ui, name, |ui| self.active.show(ui)) {
                Ok(Some(action)) => self.dispatch_login(ctx, action),
                Ok(None) => {}
                Err(error) => self.render_error = Some(error),
            }
        });
    }
}
