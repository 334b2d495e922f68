use async_std::io::{self, prelude::*};
use futures_core::stream::LocalBoxStream;
use futures_lite::{stream, StreamExt};
use futures_sequencer::delegate::{Delegate, DelegateStream};
use futures_sequencer::{AppendError, Chain};
use futures_time::time::Duration;
use std::error::Error;

/// Reads lines from stdin and echoes every word back, one word every 50ms.
///
/// Reading stdin never waits on the slow echo: each line is turned into its
/// own stream of words and appended to the chain, and the words come out in
/// the order the lines were read.
#[async_std::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    let DelegateStream {
        mut writable,
        readable,
    } = DelegateStream::new(Words).map_err(|err| err.to_string())?;

    let lines = io::BufReader::new(io::stdin()).lines();
    let input = lines.filter_map(|line| line.ok());

    let printer = async {
        let mut out = io::stdout();
        let mut readable = readable;
        while let Some(word) = readable.next().await {
            out.write_all(word.as_bytes()).await?;
            out.write_all(b"\n").await?;
        }
        out.flush().await
    };

    let (written, printed) = futures_lite::future::zip(writable.pipe_from(input), printer).await;
    written.map_err(|err| err.to_string())?;
    printed?;
    Ok(())
}

struct Words;

impl Delegate<String> for Words {
    type Stream = LocalBoxStream<'static, String>;

    fn start(&mut self, chain: &Chain<Self::Stream>) -> Result<(), AppendError<Self::Stream>> {
        chain.append(stream::once(String::from("-- echo --")).boxed_local())
    }

    fn transform(
        &mut self,
        line: String,
        chain: &Chain<Self::Stream>,
    ) -> Result<(), AppendError<Self::Stream>> {
        let words: Vec<String> = line.split_whitespace().map(String::from).collect();
        let words = stream::iter(words).then(|word| async move {
            futures_time::task::sleep(Duration::from_millis(50)).await;
            word
        });
        chain.append(words.boxed_local())
    }

    fn finish(&mut self, chain: &Chain<Self::Stream>) -> Result<(), AppendError<Self::Stream>> {
        chain.append(stream::once(String::from("-- done --")).boxed_local())
    }
}
