use std::fs;
use std::io;
use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mylife_client::{
    AuthResponse, ClientError, MyLifeClient, PostDetail, PostInput, PostSummary, ProfileDetail,
    Uuid,
};

const TOKEN_FILE: &str = ".mylife_token";
const DEFAULT_SERVER: &str = "http://127.0.0.1:8080";

#[derive(Debug, Parser)]
#[command(name = "mylife-cli", version, about = "Command line client for the MyLife posts API")]
struct Cli {
    /// Server address; falls back to MYLIFE_SERVER, then 127.0.0.1:8080.
    #[arg(long, global = true, env = "MYLIFE_SERVER")]
    server: Option<String>,

    /// Print responses as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create an account and its profile.
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        bio: Option<String>,
    },
    /// Log in and store the token.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored token.
    Logout,
    /// Create a post (needs a token).
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        private: bool,
    },
    /// Show one post.
    Get {
        #[arg(long)]
        id: Uuid,
    },
    /// Update a post you created (needs a token).
    ///
    /// Fields that are not given keep their current value.
    Update {
        #[arg(long)]
        id: Uuid,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        private: Option<bool>,
    },
    /// Delete a post you created (needs a token).
    Delete {
        #[arg(long)]
        id: Uuid,
    },
    /// List public posts.
    List,
    /// Show a profile; without --id shows your own (needs a token).
    Profile {
        #[arg(long)]
        id: Option<Uuid>,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    if let Err(err) = run(Cli::parse()).await {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let server = normalize_server(cli.server.unwrap_or_else(|| DEFAULT_SERVER.to_string()));
    let mut client = MyLifeClient::new(server).map_err(map_client_error)?;

    if let Some(token) = load_token().context("failed to read .mylife_token")? {
        client.set_token(token);
    }
    let out = Output { json: cli.json };

    match cli.command {
        Command::Register {
            username,
            email,
            password,
            bio,
        } => {
            let auth = client
                .register(&username, &email, &password, bio.as_deref())
                .await
                .map_err(map_client_error)?;
            persist_token(&client).context("failed to store token")?;
            out.auth("Registered", &auth);
        }
        Command::Login { username, password } => {
            let auth = client
                .login(&username, &password)
                .await
                .map_err(map_client_error)?;
            persist_token(&client).context("failed to store token")?;
            out.auth("Logged in", &auth);
        }
        Command::Logout => {
            remove_token().context("failed to remove token")?;
            println!("Logged out");
        }
        Command::Create {
            title,
            description,
            private,
        } => {
            let input = PostInput {
                title,
                description,
                is_private: private,
            };
            let id = client.create_post(&input).await.map_err(map_client_error)?;
            out.id("Post created", id);
        }
        Command::Get { id } => {
            let post = client.get_post(id).await.map_err(map_client_error)?;
            out.post(&post);
        }
        Command::Update {
            id,
            title,
            description,
            private,
        } => {
            let current = client.get_post(id).await.map_err(map_client_error)?;
            let input = merge_update(current, title, description, private);
            let id = client
                .update_post(id, &input)
                .await
                .map_err(map_client_error)?;
            out.id("Post updated", id);
        }
        Command::Delete { id } => {
            client.delete_post(id).await.map_err(map_client_error)?;
            out.id("Post deleted", id);
        }
        Command::List => {
            let posts = client.list_posts().await.map_err(map_client_error)?;
            out.posts(&posts);
        }
        Command::Profile { id } => {
            let profile = match id {
                Some(id) => client.get_profile(id).await,
                None => client.my_profile().await,
            }
            .map_err(map_client_error)?;
            out.profile(&profile);
        }
    }

    Ok(())
}

fn merge_update(
    current: PostDetail,
    title: Option<String>,
    description: Option<String>,
    private: Option<bool>,
) -> PostInput {
    PostInput {
        title: title.unwrap_or(current.title),
        description: description.unwrap_or(current.description),
        is_private: private.unwrap_or(current.is_private),
    }
}

fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn parse_token_content(raw: &str) -> Option<String> {
    let token = raw.trim().to_string();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

fn load_token() -> io::Result<Option<String>> {
    if !Path::new(TOKEN_FILE).exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(TOKEN_FILE)?;
    Ok(parse_token_content(&raw))
}

fn persist_token(client: &MyLifeClient) -> io::Result<()> {
    if let Some(token) = client.get_token() {
        fs::write(TOKEN_FILE, token)?;
    }
    Ok(())
}

fn remove_token() -> io::Result<()> {
    match fs::remove_file(TOKEN_FILE) {
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

fn map_client_error(err: ClientError) -> anyhow::Error {
    let message = match err {
        ClientError::Unauthorized(message) => format!(
            "unauthorized ({message}): run `mylife-cli login ...` or `mylife-cli register ...`"
        ),
        ClientError::Forbidden(message) => format!("forbidden: {message}"),
        ClientError::NotFound(message) => format!("not found: {message}"),
        ClientError::InvalidRequest(message) => format!("invalid request: {message}"),
        ClientError::Decode(err) => format!("unexpected server response: {err}"),
        ClientError::Http(err) => format!("http error: {err}"),
    };
    anyhow::anyhow!(message)
}

struct Output {
    json: bool,
}

impl Output {
    fn auth(&self, title: &str, auth: &AuthResponse) {
        if self.json {
            return print_json(auth);
        }
        println!("{title}");
        println!("token: {}", auth.access_token);
        println!("user:");
        println!("  id: {}", auth.user.id);
        println!("  username: {}", auth.user.username);
        println!("  email: {}", auth.user.email);
        println!("  created_at: {}", auth.user.created_at);
    }

    fn id(&self, title: &str, id: Uuid) {
        if self.json {
            return print_json(&serde_json::json!({ "id": id }));
        }
        println!("{title}: id={id}");
    }

    fn post(&self, post: &PostDetail) {
        if self.json {
            return print_json(post);
        }
        println!("id: {}", post.id);
        println!("title: {}", post.title);
        println!("description: {}", post.description);
        println!("private: {}", post.is_private);
        println!("author: {} ({})", post.profile.username, post.profile.id);
        println!("created_at: {}", post.created_at);
        println!("updated_at: {}", post.updated_at);
    }

    fn posts(&self, posts: &[PostSummary]) {
        if self.json {
            return print_json(&posts);
        }
        println!("Posts: {}", posts.len());
        for post in posts {
            println!("{}", summary_line(post));
        }
    }

    fn profile(&self, detail: &ProfileDetail) {
        if self.json {
            return print_json(detail);
        }
        println!("profile: {} ({})", detail.profile.username, detail.profile.id);
        if let Some(bio) = &detail.profile.bio {
            println!("bio: {bio}");
        }
        println!("posts: {}", detail.posts.len());
        for post in &detail.posts {
            println!("{}", summary_line(post));
        }
    }
}

fn summary_line(post: &PostSummary) -> String {
    let marker = if post.is_private { " [private]" } else { "" };
    format!("- [{}] {}{}", post.id, post.title, marker)
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(err) => eprintln!("error: failed to encode output: {err}"),
    }
}
