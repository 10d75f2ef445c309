use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand, ValueEnum};
use journal_client::forms::{ArticleForm, CategoryForm, FormErrors, LoginForm, RegisterForm};
use journal_client::listing::{
    ADMIN_PAGE_SIZE, ARTICLE_SEARCH_FIELDS, CATEGORY_SEARCH_FIELDS, ListQuery, Page,
    READER_PAGE_SIZE,
};
use journal_client::session::Session;
use journal_client::{Article, Category, ClientError, JournalClient, Profile, Role};

const SESSION_FILE: &str = ".journal_session";
const DEFAULT_API: &str = "https://test-fe.mysellerpintar.com/api";

#[derive(Debug, Parser)]
#[command(name = "journal-cli", version, about = "CLI клиент для API журнала")]
struct Cli {
    /// Базовый URL API.
    #[arg(long, global = true, env = "JOURNAL_API_URL", default_value = DEFAULT_API)]
    api: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Вход; сессия сохраняется в .journal_session.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Регистрация пользователя.
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long, value_enum, default_value_t = RoleArg::User)]
        role: RoleArg,
    },
    /// Забыть сохранённую сессию.
    Logout,
    /// Профиль текущего пользователя.
    Whoami,
    /// Статьи.
    #[command(subcommand)]
    Articles(ArticlesCommand),
    /// Категории.
    #[command(subcommand)]
    Categories(CategoriesCommand),
    /// Загрузка изображения; печатает URL для --image-url.
    Upload {
        #[arg(long)]
        file: PathBuf,
    },
}

#[derive(Debug, Subcommand)]
enum ArticlesCommand {
    /// Список статей.
    List {
        #[command(flatten)]
        list: ListArgs,
        /// Идентификатор категории.
        #[arg(long)]
        category: Option<String>,
    },
    /// Статья по id.
    Get {
        #[arg(long)]
        id: String,
    },
    /// Создание статьи (только Admin).
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Обновление статьи (только Admin).
    ///
    /// Не указанные поля берутся из текущей версии статьи.
    Update {
        #[arg(long)]
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Удаление статьи (только Admin).
    Delete {
        #[arg(long)]
        id: String,
    },
}

#[derive(Debug, Subcommand)]
enum CategoriesCommand {
    /// Список категорий.
    List {
        #[command(flatten)]
        list: ListArgs,
    },
    /// Создание категории (только Admin).
    Create {
        #[arg(long)]
        name: String,
    },
    /// Переименование категории (только Admin).
    Update {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
    },
    /// Удаление категории (только Admin).
    Delete {
        #[arg(long)]
        id: String,
    },
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Строка поиска.
    #[arg(long, default_value = "")]
    search: String,
    #[arg(long, default_value_t = 1)]
    page: u32,
    /// Размер страницы; по умолчанию как во фронтенде.
    #[arg(long)]
    limit: Option<u32>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RoleArg {
    Admin,
    User,
}

impl From<RoleArg> for Role {
    fn from(value: RoleArg) -> Self {
        match value {
            RoleArg::Admin => Role::Admin,
            RoleArg::User => Role::User,
        }
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    if let Err(err) = run().await {
        eprintln!("Ошибка: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut client = JournalClient::new(normalize_api(cli.api)).map_err(map_client_error)?;
    let session = load_session(Path::new(SESSION_FILE))
        .with_context(|| format!("не удалось прочитать {SESSION_FILE}"))?;
    if let Some(session) = &session {
        client.set_token(session.token.clone());
    }

    match cli.command {
        Command::Login { username, password } => {
            let payload = LoginForm { username, password }
                .submit()
                .map_err(form_error)?;
            let response = client.login(&payload).await.map_err(map_client_error)?;
            let session = Session::from(response);
            save_session(Path::new(SESSION_FILE), &session)
                .with_context(|| format!("не удалось сохранить {SESSION_FILE}"))?;
            println!("Вход выполнен: role={}", session.role);
        }
        Command::Register {
            username,
            password,
            role,
        } => {
            let payload = RegisterForm {
                username,
                password,
                role: role.into(),
            }
            .submit()
            .map_err(form_error)?;
            client.register(&payload).await.map_err(map_client_error)?;
            println!(
                "Пользователь {} зарегистрирован, выполните `journal-cli login`",
                payload.username
            );
        }
        Command::Logout => {
            clear_session(Path::new(SESSION_FILE))
                .with_context(|| format!("не удалось удалить {SESSION_FILE}"))?;
            println!("Сессия удалена");
        }
        Command::Whoami => {
            let profile = client.profile().await.map_err(map_client_error)?;
            print_profile(&profile);
        }
        Command::Articles(command) => run_articles(&client, command).await?,
        Command::Categories(command) => run_categories(&client, command).await?,
        Command::Upload { file } => {
            let bytes =
                fs::read(&file).with_context(|| format!("не удалось прочитать {}", file.display()))?;
            let file_name = file
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("image")
                .to_string();
            let uploaded = client
                .upload_image(&file_name, bytes)
                .await
                .map_err(map_client_error)?;
            println!("{}", uploaded.image_url);
        }
    }

    Ok(())
}

async fn run_articles(client: &JournalClient, command: ArticlesCommand) -> Result<()> {
    match command {
        ArticlesCommand::List { list, category } => {
            let query = ListQuery::new(list.limit.unwrap_or(READER_PAGE_SIZE))
                .with_search(&list.search)
                .with_category(category.as_deref())
                .with_page(list.page)
                .with_search_fields(ARTICLE_SEARCH_FIELDS);
            let page = client.list_articles(&query).await.map_err(map_client_error)?;
            print_articles(&query, &page);
        }
        ArticlesCommand::Get { id } => {
            let article = client.get_article(&id).await.map_err(map_client_error)?;
            print_article("Статья", &article);
        }
        ArticlesCommand::Create {
            title,
            content,
            category,
            image_url,
        } => {
            let payload = ArticleForm {
                title,
                content,
                category_id: category,
                image_url,
            }
            .submit(&[])
            .map_err(form_error)?;
            let article = client
                .create_article(&payload)
                .await
                .map_err(map_client_error)?;
            print_article("Статья создана", &article);
        }
        ArticlesCommand::Update {
            id,
            title,
            content,
            category,
            image_url,
        } => {
            let current = client.get_article(&id).await.map_err(map_client_error)?;
            let form = ArticleForm {
                title: title.unwrap_or_else(|| current.title.clone()),
                content: content.unwrap_or_else(|| current.content.clone()),
                category_id: category
                    .or_else(|| current.category_key().map(str::to_string))
                    .unwrap_or_default(),
                image_url: image_url.or_else(|| current.image_url.clone()),
            };
            let payload = form.submit(&[]).map_err(form_error)?;
            let article = client
                .update_article(&id, &payload)
                .await
                .map_err(map_client_error)?;
            print_article("Статья обновлена", &article);
        }
        ArticlesCommand::Delete { id } => {
            client.delete_article(&id).await.map_err(map_client_error)?;
            println!("Статья удалена: id={id}");
        }
    }
    Ok(())
}

async fn run_categories(client: &JournalClient, command: CategoriesCommand) -> Result<()> {
    match command {
        CategoriesCommand::List { list } => {
            let query = ListQuery::new(list.limit.unwrap_or(ADMIN_PAGE_SIZE))
                .with_search(&list.search)
                .with_page(list.page)
                .with_search_fields(CATEGORY_SEARCH_FIELDS);
            let page = client
                .list_categories(&query)
                .await
                .map_err(map_client_error)?;
            print_categories(&page);
        }
        CategoriesCommand::Create { name } => {
            let payload = CategoryForm { name }.submit().map_err(form_error)?;
            let category = client
                .create_category(&payload)
                .await
                .map_err(map_client_error)?;
            println!("Категория создана: id={} name={}", category.id, category.name);
        }
        CategoriesCommand::Update { id, name } => {
            let payload = CategoryForm { name }.submit().map_err(form_error)?;
            let category = client
                .update_category(&id, &payload)
                .await
                .map_err(map_client_error)?;
            println!("Категория обновлена: id={} name={}", category.id, category.name);
        }
        CategoriesCommand::Delete { id } => {
            client.delete_category(&id).await.map_err(map_client_error)?;
            println!("Категория удалена: id={id}");
        }
    }
    Ok(())
}

fn normalize_api(api: String) -> String {
    let api = api.trim().trim_end_matches('/').to_string();
    if api.starts_with("http://") || api.starts_with("https://") {
        return api;
    }

    format!("https://{api}")
}

fn parse_session_content(raw: &str) -> Option<Session> {
    let session: Session = serde_json::from_str(raw).ok()?;
    Session::restore(
        Some(session.token.as_str()),
        Some(session.role.as_str()),
        session.refresh_token.as_deref(),
    )
}

fn load_session(path: &Path) -> io::Result<Option<Session>> {
    if !path.exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(path)?;
    Ok(parse_session_content(&raw))
}

fn save_session(path: &Path, session: &Session) -> io::Result<()> {
    let raw = serde_json::to_string_pretty(session).map_err(io::Error::other)?;
    fs::write(path, raw)
}

fn clear_session(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

fn map_client_error(err: ClientError) -> anyhow::Error {
    let message = match err {
        ClientError::Unauthorized(message) => format!(
            "требуется авторизация ({message}): выполните `journal-cli login ...`"
        ),
        ClientError::NotFound => "ресурс не найден".to_string(),
        ClientError::InvalidRequest(message) => format!("некорректный запрос: {message}"),
        ClientError::Api {
            status,
            message,
            field_errors,
        } => {
            let mut text = format!("ошибка API ({status}): {message}");
            for (field, error) in &field_errors {
                text.push_str(&format!("\n  {field}: {error}"));
            }
            text
        }
        ClientError::Decode(message) => format!("неожиданный ответ API: {message}"),
        ClientError::Network(message) => format!("API недоступен: {message}"),
        ClientError::Http(err) => format!("ошибка HTTP: {err}"),
    };
    anyhow!(message)
}

fn form_error(errors: FormErrors) -> anyhow::Error {
    let mut lines: Vec<String> = errors
        .fields()
        .iter()
        .map(|(field, message)| format!("  {field}: {message}"))
        .collect();
    if let Some(general) = errors.general() {
        lines.insert(0, format!("  {general}"));
    }
    anyhow!("некорректные данные:\n{}", lines.join("\n"))
}

fn print_profile(profile: &Profile) {
    println!("username: {}", profile.username);
    println!("role: {}", profile.role);
    if let Some(id) = &profile.id {
        println!("id: {id}");
    }
}

fn print_article(title: &str, article: &Article) {
    println!("{title}");
    println!("id: {}", article.id);
    println!("title: {}", article.title);
    println!("category: {}", article.category_name());
    println!("created_at: {}", article.created_at.format("%B %-d, %Y"));
    if let Some(image_url) = &article.image_url {
        println!("image_url: {image_url}");
    }
    println!();
    println!("{}", article.content);
}

fn print_articles(query: &ListQuery, page: &Page<Article>) {
    match page.total {
        Some(total) => println!(
            "Статей: {} (page={}, limit={}, total={total})",
            page.items.len(),
            query.page(),
            query.limit()
        ),
        None => println!(
            "Статей: {} (page={}, limit={})",
            page.items.len(),
            query.page(),
            query.limit()
        ),
    }

    for article in &page.items {
        println!(
            "- [{}] {} ({}, {})",
            article.id,
            article.title,
            article.category_name(),
            article.created_at.format("%Y-%m-%d")
        );
    }
}

fn print_categories(page: &Page<Category>) {
    println!("Категорий: {}", page.total.unwrap_or(page.items.len() as u64));
    for category in &page.items {
        println!("- [{}] {}", category.id, category.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_api_keeps_scheme_and_drops_trailing_slash() {
        assert_eq!(
            normalize_api("http://localhost:3000/api/".to_string()),
            "http://localhost:3000/api"
        );
    }

    #[test]
    fn normalize_api_adds_https_scheme() {
        assert_eq!(
            normalize_api("example.com/api".to_string()),
            "https://example.com/api"
        );
    }

    #[test]
    fn session_file_round_trips_through_disk() {
        let path = std::env::temp_dir().join(format!("journal-cli-session-{}", process::id()));
        let session = Session {
            token: "abc.def.ghi".to_string(),
            role: Role::Admin,
            refresh_token: None,
        };

        save_session(&path, &session).expect("session must be saved");
        let loaded = load_session(&path).expect("session must load");
        assert_eq!(loaded, Some(session));

        clear_session(&path).expect("session must be removed");
        assert_eq!(load_session(&path).expect("missing file is ok"), None);
        clear_session(&path).expect("second logout is a no-op");
    }

    #[test]
    fn blank_or_corrupt_session_is_ignored() {
        assert!(parse_session_content("").is_none());
        assert!(parse_session_content(r#"{"token":"  ","role":"Admin"}"#).is_none());
        assert!(parse_session_content(r#"{"token":"t","role":"Guest"}"#).is_none());
    }

    #[test]
    fn cli_parses_nested_commands() {
        let cli = Cli::try_parse_from([
            "journal-cli",
            "--api",
            "http://localhost:3000/api",
            "articles",
            "list",
            "--search",
            "rust",
            "--category",
            "c1",
        ])
        .expect("args must parse");

        assert_eq!(cli.api, "http://localhost:3000/api");
        match cli.command {
            Command::Articles(ArticlesCommand::List { list, category }) => {
                assert_eq!(list.search, "rust");
                assert_eq!(list.page, 1);
                assert_eq!(list.limit, None);
                assert_eq!(category.as_deref(), Some("c1"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn register_defaults_to_user_role() {
        let cli = Cli::try_parse_from([
            "journal-cli",
            "register",
            "--username",
            "janedoe",
            "--password",
            "secret123",
        ])
        .expect("args must parse");

        match cli.command {
            Command::Register { role, .. } => assert_eq!(Role::from(role), Role::User),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn unauthorized_error_suggests_login() {
        let err = map_client_error(ClientError::Unauthorized("login required".to_string()));
        assert!(err.to_string().contains("journal-cli login"));
    }

    #[test]
    fn api_error_lists_field_errors() {
        let mut field_errors = journal_client::FieldErrors::new();
        field_errors.insert("name".to_string(), "already exists".to_string());
        let err = map_client_error(ClientError::Api {
            status: 422,
            message: "Validation failed".to_string(),
            field_errors,
        });
        let text = err.to_string();
        assert!(text.contains("422"));
        assert!(text.contains("name: already exists"));
    }

    #[test]
    fn form_error_lists_every_field() {
        let errors = CategoryForm {
            name: "a".to_string(),
        }
        .submit()
        .expect_err("short name must fail");
        let text = form_error(errors).to_string();
        assert!(text.contains("name: Category name must be at least 2 characters"));
    }
}
