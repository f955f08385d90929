use clap::{Parser, Subcommand};
use nestnoteapp::model::BlockType;

#[derive(Parser, Debug)]
#[command(
    name = "nestnote",
    bin_name = "nestnote",
    version,
    disable_help_subcommand = true,
    after_help = "Pages and blocks are addressed by title, by an id prefix (4+ chars), or\nfor blocks by their 1-based position in the page."
)]
#[command(about = "Nested pages of typed blocks, edited from the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $NESTNOTE_DATA, then the OS data dir)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data: Option<String>,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count, help_heading = "Options")]
    pub verbose: u8,

    /// Print JSON instead of text (tree, show, recent)
    #[arg(long, global = true, help_heading = "Options")]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a page and open it
    #[command(alias = "n", display_order = 1)]
    New {
        /// Create inside another page
        #[arg(long = "in", short = 'i', value_name = "PAGE")]
        parent: Option<String>,

        /// Icon (usually an emoji)
        #[arg(long)]
        icon: Option<String>,

        /// Title words (joined with spaces; the default title when empty)
        #[arg(trailing_var_arg = true)]
        title: Vec<String>,
    },

    /// Show the navigation tree
    #[command(alias = "ls", display_order = 2)]
    Tree,

    /// Open a page and print its blocks
    #[command(alias = "s", display_order = 3)]
    Show { page: String },

    /// Recently edited (or created) pages
    #[command(display_order = 4)]
    Recent {
        /// Order by creation time instead of last edit
        #[arg(long)]
        created: bool,
    },

    /// Type text into a block (markdown shorthand and /page apply)
    #[command(alias = "t", display_order = 10)]
    Type {
        page: String,
        block: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Add a block at the end of a page, or after another block
    #[command(alias = "a", display_order = 11)]
    Add {
        page: String,

        /// Block to insert after
        #[arg(long, value_name = "BLOCK")]
        after: Option<String>,

        /// Block type
        #[arg(long = "type", short = 't', default_value = "paragraph")]
        block_type: BlockType,

        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Delete a block
    #[command(name = "rm-block", display_order = 12)]
    RmBlock { page: String, block: String },

    /// Move a block to a 1-based position
    #[command(name = "move-block", display_order = 13)]
    MoveBlock {
        page: String,
        block: String,
        position: usize,
    },

    /// Change a block's type
    #[command(display_order = 14)]
    Retype {
        page: String,
        block: String,
        block_type: BlockType,
    },

    /// Toggle a checkbox block
    #[command(display_order = 15)]
    Check { page: String, block: String },

    /// Follow a page block, creating its page if it is a placeholder
    #[command(display_order = 16)]
    Follow { page: String, block: String },

    /// Remove empty paragraphs (the first block is kept)
    #[command(display_order = 17)]
    Cleanup { page: String },

    /// Rename a page
    #[command(display_order = 20)]
    Rename {
        page: String,
        #[arg(required = true, trailing_var_arg = true)]
        title: Vec<String>,
    },

    /// Set or clear a page's icon
    #[command(display_order = 21)]
    Icon { page: String, icon: Option<String> },

    /// Move a page under another one (to the root without a parent)
    #[command(display_order = 22)]
    Mv { page: String, parent: Option<String> },

    /// Delete a page and its sub-pages
    #[command(display_order = 23)]
    Rm {
        page: String,

        /// Do not ask before deleting a page with sub-pages
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Expand or collapse a page in the tree
    #[command(display_order = 24)]
    Toggle { page: String },

    /// Check and repair the stored state
    #[command(display_order = 30)]
    Doctor,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add_with_type() {
        let cli = Cli::parse_from(["nestnote", "add", "Inbox", "-t", "checkbox", "buy", "milk"]);
        match cli.command {
            Some(Commands::Add {
                page,
                block_type,
                text,
                after,
            }) => {
                assert_eq!(page, "Inbox");
                assert_eq!(block_type, BlockType::Checkbox);
                assert_eq!(text, vec!["buy", "milk"]);
                assert!(after.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_type_keeps_leading_dash() {
        let cli = Cli::parse_from(["nestnote", "type", "Inbox", "2", "-", "item"]);
        match cli.command {
            Some(Commands::Type { text, .. }) => assert_eq!(text.join(" "), "- item"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["nestnote", "tree", "--data", "/tmp/notes", "-vv"]);
        assert_eq!(cli.data.as_deref(), Some("/tmp/notes"));
        assert_eq!(cli.verbose, 2);
        assert!(!cli.json);
    }

    #[test]
    fn test_unknown_block_type_is_rejected() {
        assert!(Cli::try_parse_from(["nestnote", "retype", "P", "1", "quote"]).is_err());
    }
}
