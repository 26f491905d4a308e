// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::PathBuf;

use clap::Parser;

use crate::cmd::create::create_from_file;
use crate::cmd::info::board_info;
use crate::cmd::play::mark_cell;
use crate::cmd::play::play_board;
use crate::cmd::play::reset_marks;
use crate::cmd::show::show_board;
use crate::config::Config;
use crate::error::Fallible;
use crate::web::server::start_server;

const DEFAULT_DATA_DIR: &str = "data";

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Serve the web interface.
    Serve {
        /// Directory holding the board database.
        #[arg(long, default_value = DEFAULT_DATA_DIR)]
        data_dir: PathBuf,
        /// Address to listen on.
        #[arg(long)]
        bind: Option<String>,
        /// Origin for share links, e.g. `https://bingo.example`.
        #[arg(long)]
        public_url: Option<String>,
        /// Reject over-long entries instead of truncating them.
        #[arg(long)]
        no_truncate: bool,
        /// Open the home page in a browser once the server is up.
        #[arg(long)]
        open: bool,
    },
    /// Create a board from a local CSV file and print its ID.
    Create {
        /// Path to the CSV file.
        file: PathBuf,
        /// Board title.
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = DEFAULT_DATA_DIR)]
        data_dir: PathBuf,
        /// Reject over-long entries instead of truncating them.
        #[arg(long)]
        no_truncate: bool,
    },
    /// Print a fresh random arrangement of a board.
    Show {
        id: String,
        #[arg(long, default_value = DEFAULT_DATA_DIR)]
        data_dir: PathBuf,
    },
    /// Print a board's metadata as JSON.
    Info {
        id: String,
        #[arg(long, default_value = DEFAULT_DATA_DIR)]
        data_dir: PathBuf,
    },
    /// Show your own copy of a board, with your marks.
    Play {
        id: String,
        #[arg(long, default_value = DEFAULT_DATA_DIR)]
        data_dir: PathBuf,
    },
    /// Toggle the mark on a cell (0-24, row by row).
    Mark {
        id: String,
        index: usize,
        #[arg(long, default_value = DEFAULT_DATA_DIR)]
        data_dir: PathBuf,
    },
    /// Clear your marks on a board.
    Reset {
        id: String,
        #[arg(long, default_value = DEFAULT_DATA_DIR)]
        data_dir: PathBuf,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Serve {
            data_dir,
            bind,
            public_url,
            no_truncate,
            open,
        } => {
            let mut config = Config::load(&data_dir)?;
            if let Some(bind) = bind {
                config.bind = bind;
            }
            if public_url.is_some() {
                config.public_url = public_url;
            }
            if no_truncate {
                config.limits.truncate = false;
            }
            start_server(config, open).await
        }
        Command::Create {
            file,
            title,
            data_dir,
            no_truncate,
        } => {
            let mut config = Config::load(&data_dir)?;
            if no_truncate {
                config.limits.truncate = false;
            }
            let id = create_from_file(&config, &file, &title)?;
            println!("{id}");
            Ok(())
        }
        Command::Show { id, data_dir } => {
            let config = Config::load(&data_dir)?;
            print!("{}", show_board(&config, &id)?);
            Ok(())
        }
        Command::Info { id, data_dir } => {
            let config = Config::load(&data_dir)?;
            println!("{}", board_info(&config, &id)?);
            Ok(())
        }
        Command::Play { id, data_dir } => {
            let config = Config::load(&data_dir)?;
            print!("{}", play_board(&config, &id)?);
            Ok(())
        }
        Command::Mark {
            id,
            index,
            data_dir,
        } => {
            let config = Config::load(&data_dir)?;
            let marked = mark_cell(&config, &id, index)?;
            println!("{}", if marked { "marked" } else { "unmarked" });
            Ok(())
        }
        Command::Reset { id, data_dir } => {
            let config = Config::load(&data_dir)?;
            reset_marks(&config, &id)?;
            println!("Marks cleared.");
            Ok(())
        }
    }
}
