use clap::{Args, Parser, Subcommand};

use wikipage::{ExtractFormat, WikiConfig};

#[derive(Parser, Debug)]
#[command(
    name = "wikipage",
    version,
    about = "Read Wikipedia pages, their sections and links from the command line"
)]
pub struct Cli {
    #[command(flatten)]
    pub client: ClientArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the text before the first section.
    Summary(PageArgs),
    /// Print the summary and every section.
    Text(PageArgs),
    /// Print the section tree, one title per line.
    Sections(PageArgs),
    Links(PageArgs),
    Backlinks(PageArgs),
    Categories(PageArgs),
    /// Print the members of a category page.
    Members(PageArgs),
    Langlinks(PageArgs),
    Info(InfoArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ClientArgs {
    #[arg(long, global = true)]
    pub language: Option<String>,

    #[arg(long, value_enum, global = true)]
    pub format: Option<ExtractFormat>,

    #[arg(long, global = true)]
    pub user_agent: Option<String>,

    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,
}

impl ClientArgs {
    pub fn into_config(self) -> WikiConfig {
        self.apply(WikiConfig::from_env())
    }

    fn apply(self, mut config: WikiConfig) -> WikiConfig {
        if let Some(language) = self.language {
            config = config.with_language(&language);
        }
        if let Some(format) = self.format {
            config = config.with_extract_format(format);
        }
        if let Some(user_agent) = self.user_agent {
            config.user_agent = user_agent;
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.timeout_ms = timeout_ms;
        }
        config
    }
}

#[derive(Args, Debug, Clone)]
pub struct PageArgs {
    pub title: String,

    #[arg(long, default_value_t = 0)]
    pub namespace: i64,
}

#[derive(Args, Debug, Clone)]
pub struct InfoArgs {
    #[command(flatten)]
    pub page: PageArgs,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::parse_from([
            "wikipage",
            "sections",
            "Rust",
            "--language",
            "CS",
            "--format",
            "html",
        ]);

        let Commands::Sections(page) = cli.command else {
            panic!("expected sections command");
        };
        assert_eq!(page.title, "Rust");
        assert_eq!(page.namespace, 0);

        let config = cli.client.apply(WikiConfig::default());
        assert_eq!(config.language, "cs");
        assert_eq!(config.extract_format, ExtractFormat::Html);
    }

    #[test]
    fn info_accepts_namespace_and_json() {
        let cli = Cli::parse_from([
            "wikipage",
            "info",
            "Category:Physics",
            "--namespace",
            "14",
            "--json",
        ]);

        let Commands::Info(args) = cli.command else {
            panic!("expected info command");
        };
        assert_eq!(args.page.namespace, 14);
        assert!(args.json);
    }
}
