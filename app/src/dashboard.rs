use common::{
    models::{CoinDetails, CoinRecord, PriceSeries, TrendingCoin},
    Result,
};
use connectors::MarketDataSource;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use views::{ChartRequest, DetailRequest, DetailView, HomeView, ListView, Ticket};

use crate::command::{Command, HELP};
use crate::config::StartView;
use crate::render;

/// The one view currently on screen. Navigating away drops it.
#[derive(Debug)]
enum Mounted {
    Home(HomeView),
    List(ListView),
    Detail(DetailView),
}

impl Mounted {
    fn name(&self) -> &'static str {
        match self {
            Mounted::Home(_) => "home",
            Mounted::List(_) => "list",
            Mounted::Detail(_) => "detail",
        }
    }
}

#[derive(Debug)]
enum Fetched {
    Markets(Ticket, Result<Vec<CoinRecord>>),
    Detail(DetailRequest, Result<(CoinDetails, PriceSeries)>),
    Chart(ChartRequest, Result<Vec<PriceSeries>>),
    Trending(Ticket, Result<Vec<TrendingCoin>>),
}

impl Fetched {
    fn kind(&self) -> &'static str {
        match self {
            Fetched::Markets(..) => "market listing",
            Fetched::Detail(..) => "coin detail",
            Fetched::Chart(..) => "comparison chart",
            Fetched::Trending(..) => "trending list",
        }
    }
}

/// A finished fetch, tagged with the mount that issued it.
#[derive(Debug)]
struct Completion {
    mount: u64,
    fetched: Fetched,
}

/// Terminal host for the dashboard views.
///
/// Fetches run as spawned tasks and report back over a channel, so input stays
/// responsive while a request is in flight. Each navigation to another screen
/// mounts a fresh view; results issued by an earlier mount are dropped.
pub struct Dashboard {
    source: Arc<dyn MarketDataSource>,
    view: Mounted,
    mount: u64,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl Dashboard {
    pub fn new(source: Arc<dyn MarketDataSource>, start: StartView) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            source,
            view: match start {
                StartView::Home => Mounted::Home(HomeView::new()),
                StartView::List => Mounted::List(ListView::default()),
            },
            mount: 1,
            tx,
            rx,
        }
    }

    pub async fn run<R>(mut self, input: R) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        self.refresh();
        self.draw();

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        info!("Input closed, exiting");
                        return Ok(());
                    };
                    if line.trim().is_empty() {
                        continue;
                    }
                    match line.parse::<Command>() {
                        Ok(Command::Quit) => return Ok(()),
                        Ok(command) => self.handle(command),
                        Err(e) => println!("{}", e),
                    }
                }
                Some(completion) = self.rx.recv() => {
                    if self.apply(completion) {
                        self.draw();
                    }
                }
            }
        }
    }

    fn handle(&mut self, command: Command) {
        debug!("Handling {:?}", command);
        match command {
            Command::Home => match self.view {
                Mounted::Home(_) => self.refresh(),
                _ => self.navigate(Mounted::Home(HomeView::new())),
            },
            Command::List => match self.view {
                Mounted::List(_) => self.refresh(),
                _ => self.navigate(Mounted::List(ListView::default())),
            },
            Command::Next | Command::Previous | Command::Page(_) => {
                let Mounted::List(list) = &mut self.view else {
                    println!("Paging applies to the market table. Type 'list' first");
                    return;
                };
                match command {
                    Command::Next => list.next_page(),
                    Command::Previous => list.previous_page(),
                    Command::Page(page) => list.go_to_page(page),
                    _ => unreachable!(),
                };
            }
            Command::Open(coin_id) => match &mut self.view {
                Mounted::Detail(view) => {
                    if let Some(request) = view.open(coin_id) {
                        self.spawn_detail(request);
                    }
                }
                _ => self.navigate(Mounted::Detail(DetailView::new(coin_id))),
            },
            Command::Range(range) => match &mut self.view {
                Mounted::Home(home) => {
                    if let Some(request) = home.select_range(range) {
                        self.spawn_chart(request);
                    }
                }
                Mounted::Detail(detail) => {
                    if let Some(request) = detail.select_range(range) {
                        self.spawn_detail(request);
                    }
                }
                Mounted::List(_) => {
                    println!("The market table has no time range");
                    return;
                }
            },
            Command::Refresh => self.refresh(),
            Command::Help => {
                println!("{}", HELP);
                return;
            }
            Command::Quit => return,
        }
        self.draw();
    }

    /// Unmounts the current view and mounts `view` with its initial fetch.
    fn navigate(&mut self, view: Mounted) {
        debug!("Unmounting {} view, mounting {}", self.view.name(), view.name());
        self.mount += 1;
        self.view = view;
        self.refresh();
    }

    /// Starts the mounted view's fetches, skipping any already in flight.
    fn refresh(&mut self) {
        match &mut self.view {
            Mounted::Home(home) => {
                let chart = home.begin_chart_load();
                let trending = home.begin_trending_load();
                if let Some(request) = chart {
                    self.spawn_chart(request);
                }
                if let Some(ticket) = trending {
                    self.spawn_trending(ticket);
                }
            }
            Mounted::List(list) => {
                if let Some(ticket) = list.begin_refresh() {
                    self.spawn_markets(ticket);
                }
            }
            Mounted::Detail(detail) => {
                if let Some(request) = detail.begin_load() {
                    self.spawn_detail(request);
                }
            }
        }
    }

    /// Routes a completion to the mounted view. Returns `true` if it changed
    /// what is on screen.
    fn apply(&mut self, completion: Completion) -> bool {
        if completion.mount != self.mount {
            warn!(
                "Dropping {} for unmounted view (mount {}, now {})",
                completion.fetched.kind(),
                completion.mount,
                self.mount
            );
            return false;
        }

        match (&mut self.view, completion.fetched) {
            (Mounted::List(list), Fetched::Markets(ticket, result)) => {
                list.complete(ticket, result)
            }
            (Mounted::Detail(detail), Fetched::Detail(request, result)) => {
                detail.complete(&request, result)
            }
            (Mounted::Home(home), Fetched::Chart(request, result)) => {
                home.complete_chart(&request, result)
            }
            (Mounted::Home(home), Fetched::Trending(ticket, result)) => {
                home.complete_trending(ticket, result)
            }
            (view, fetched) => {
                warn!("Dropping {} for the {} view", fetched.kind(), view.name());
                false
            }
        }
    }

    fn draw(&self) {
        let text = match &self.view {
            Mounted::Home(home) => render::render_home(&home.render()),
            Mounted::List(list) => render::render_list(&list.render()),
            Mounted::Detail(detail) => render::render_detail(&detail.render()),
        };
        println!("\n{}", text);
    }

    fn spawn_markets(&self, ticket: Ticket) {
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let mount = self.mount;
        tokio::spawn(async move {
            let result = ListView::fetch(source.as_ref()).await;
            let fetched = Fetched::Markets(ticket, result);
            let _ = tx.send(Completion { mount, fetched });
        });
    }

    fn spawn_detail(&self, request: DetailRequest) {
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let mount = self.mount;
        tokio::spawn(async move {
            let result = DetailView::fetch(source.as_ref(), &request).await;
            let fetched = Fetched::Detail(request, result);
            let _ = tx.send(Completion { mount, fetched });
        });
    }

    fn spawn_chart(&self, request: ChartRequest) {
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let mount = self.mount;
        tokio::spawn(async move {
            let result = HomeView::fetch_chart(source.as_ref(), &request).await;
            let fetched = Fetched::Chart(request, result);
            let _ = tx.send(Completion { mount, fetched });
        });
    }

    fn spawn_trending(&self, ticket: Ticket) {
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let mount = self.mount;
        tokio::spawn(async move {
            let result = HomeView::fetch_trending(source.as_ref()).await;
            let fetched = Fetched::Trending(ticket, result);
            let _ = tx.send(Completion { mount, fetched });
        });
    }
}
