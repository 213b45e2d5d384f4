use std::process::ExitCode;

use clap::Parser;
use log::debug;

use makerstore::auth::SignupForm;
use makerstore::maker::SavedMaker;
use makerstore::outcome::{Navigation, Notice, Severity};
use makerstore::session::Session;
use makerstore::{AccountStore, FileStorage, Storage};

mod args;
use args::{Args, Command, MakerArgs};

fn main() -> ExitCode {
    pretty_env_logger::init();

    let args = Args::parse();
    let path = args.store_path();
    debug!("using store {path:?}");

    let mut store = AccountStore::new(FileStorage::new(path));

    if run(&mut store, args.command) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn run<S: Storage>(store: &mut AccountStore<S>, command: Command) -> bool {
    match command {
        Command::Signup {
            username,
            password,
            confirm_password,
            user_type,
        } => {
            let form = SignupForm::new(username, password, confirm_password, user_type);
            match store.register_user(&form) {
                Ok(notice) => show(&notice),
                Err(e) => show(&e.into()),
            }
        }
        Command::Login { username, password } => match store.authenticate(&username, &password) {
            Ok(login) => {
                let session = login.session;
                println!(
                    "{} ({}, {})",
                    session.username,
                    session.user_type,
                    session.user_type.badge_color()
                );
                show(&login.notice)
            }
            Err(e) => show(&e.into()),
        },
        Command::Logout => {
            navigate(store.end_session());
            true
        }
        Command::Whoami => match store.require_session() {
            Ok(session) => {
                println!(
                    "{} ({}), logged in at {}",
                    session.username, session.user_type, session.login_time
                );
                true
            }
            Err(auth) => {
                navigate(auth.navigation());
                false
            }
        },
        Command::Profile => {
            navigate(store.profile_entry());
            true
        }
        Command::Save(maker) => {
            let Some(session) = logged_in(store) else {
                return false;
            };
            let maker: SavedMaker = maker.into();
            if store.add_favorite(Some(&session), &maker) {
                println!("saved {}", maker.id);
            } else {
                println!("{} is already saved", maker.id);
            }
            true
        }
        Command::Unsave { id } => {
            let Some(session) = logged_in(store) else {
                return false;
            };
            let removed = store.remove_favorite(Some(&session), &id);
            if removed {
                println!("unsaved {id}");
            }
            removed
        }
        Command::Toggle(maker) => {
            let Some(session) = logged_in(store) else {
                return false;
            };
            let maker: SavedMaker = maker.into();
            let saved = store.toggle_favorite(Some(&session), &maker);
            println!("{} {}", if saved { "saved" } else { "unsaved" }, maker.id);
            true
        }
        Command::Saved => {
            let Some(session) = logged_in(store) else {
                return false;
            };
            for maker in store.saved_makers(Some(&session)) {
                match (&maker.name, &maker.url) {
                    (Some(name), Some(url)) => println!("{}\t{name}\t{url}", maker.id),
                    (Some(name), None) => println!("{}\t{name}", maker.id),
                    (None, Some(url)) => println!("{}\t\t{url}", maker.id),
                    (None, None) => println!("{}", maker.id),
                }
            }
            true
        }
        Command::IsSaved { id } => {
            let session = store.current_session();
            let saved = store.is_favorite(session.as_ref(), &id);
            println!("{saved}");
            saved
        }
    }
}

/// The session, or a hint to log in first.
fn logged_in<S: Storage>(store: &AccountStore<S>) -> Option<Session> {
    match store.require_session() {
        Ok(session) => Some(session),
        Err(auth) => {
            println!("Please log in to save makers");
            navigate(auth.navigation());
            None
        }
    }
}

fn show(notice: &Notice) -> bool {
    println!("{notice}");

    // the follow-up delay is ignored on a terminal
    if let Some(follow_up) = notice.follow_up {
        navigate(follow_up.to);
    }

    notice.severity == Severity::Success
}

fn navigate(to: Navigation) {
    let page = match to {
        Navigation::ShowLogin | Navigation::RedirectToLogin => "login",
        Navigation::RedirectToProfile => "profile",
    };
    println!("-> {page}");
}

impl From<MakerArgs> for SavedMaker {
    fn from(args: MakerArgs) -> Self {
        let MakerArgs { id, name, url } = args;

        let mut maker = SavedMaker::new(id);
        maker.name = name;
        maker.url = url;
        maker
    }
}
