//! End-to-end canvas and broker behavior on a full-size canvas

use std::sync::Arc;
use std::time::Duration;

use newplaces_broker::{Broker, BrokerConfig, BrokerHandle};
use newplaces_canvas::{CanvasConfig, CanvasStore, Error, MemoryBackend, Pixel};
use tokio::time::timeout;

const WIDTH: usize = 2000;
const HEIGHT: usize = 2000;

async fn full_canvas() -> (Arc<CanvasStore>, Arc<MemoryBackend>) {
    let config = CanvasConfig::default();
    assert_eq!((config.width as usize, config.height as usize), (WIDTH, HEIGHT));

    let backend = Arc::new(MemoryBackend::with_blob(
        config.key.clone(),
        vec![0; WIDTH * HEIGHT * 4],
    ));
    let store = CanvasStore::initialize(backend.clone(), &config)
        .await
        .unwrap();
    (Arc::new(store), backend)
}

fn running_broker() -> BrokerHandle<Pixel> {
    let (broker, handle) = Broker::new(BrokerConfig::default());
    broker.spawn();
    handle
}

/// Commit then publish, as a request handler does
async fn place(store: &CanvasStore, broker: &BrokerHandle<Pixel>, pixel: Pixel) -> Result<Pixel, Error> {
    let committed = store.set_pixel(pixel.x, pixel.y, pixel.color).await?;
    broker.publish(committed).await.unwrap();
    Ok(committed)
}

#[tokio::test]
async fn test_full_canvas_write_and_read() {
    let (store, backend) = full_canvas().await;

    let snapshot = store.snapshot().await;
    assert_eq!(snapshot.len(), 16_000_000);
    assert!(snapshot.iter().all(|b| *b == 0));

    store.set_pixel(1999, 1999, 0xFFFFFFFF).await.unwrap();

    let offset = (1999 * WIDTH + 1999) * 4;
    assert_eq!(offset, 15_999_996);
    let snapshot = store.snapshot().await;
    assert_eq!(&snapshot[offset..], &[0xFF, 0xFF, 0xFF, 0xFF]);
    assert!(snapshot[..offset].iter().all(|b| *b == 0));

    let durable = backend.blob("newplaces").await.unwrap();
    assert_eq!(durable, snapshot);
}

#[tokio::test]
async fn test_full_canvas_rejects_out_of_range() {
    let (store, _backend) = full_canvas().await;

    let err = store.set_pixel(2000, 0, 0xFFFFFFFF).await.unwrap_err();
    assert!(matches!(err, Error::OutOfRange { x: 2000, y: 0, .. }));

    let err = store.set_pixel(0, 2000, 0xFFFFFFFF).await.unwrap_err();
    assert!(matches!(err, Error::OutOfRange { .. }));
}

#[tokio::test]
async fn test_subscriber_sees_committed_pixel() {
    let (store, _backend) = full_canvas().await;
    let broker = running_broker();
    let mut subscription = broker.subscribe().await.unwrap();

    let pixel = Pixel::new(0, 0, 0xE50000FF);
    place(&store, &broker, pixel).await.unwrap();

    let received = timeout(Duration::from_secs(2), subscription.recv())
        .await
        .unwrap();
    assert_eq!(received, Some(pixel));
    assert_eq!(store.pixel(0, 0).await.unwrap(), 0xE50000FF);

    broker.stop();
}

#[tokio::test]
async fn test_rejected_write_is_not_broadcast() {
    let (store, _backend) = full_canvas().await;
    let broker = running_broker();
    let mut subscription = broker.subscribe().await.unwrap();

    assert!(place(&store, &broker, Pixel::new(5, 5, 0x01020304)).await.is_err());
    let good = Pixel::new(5, 5, 0x0083C7FF);
    place(&store, &broker, good).await.unwrap();

    let received = timeout(Duration::from_secs(2), subscription.recv())
        .await
        .unwrap();
    assert_eq!(received, Some(good));
    assert!(subscription.try_recv().is_none());

    broker.stop();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_writers_fan_out_to_every_subscriber() {
    let (store, _backend) = full_canvas().await;
    let (broker, handle) = Broker::new(BrokerConfig {
        subscriber_capacity: 64,
        ..BrokerConfig::default()
    });
    broker.spawn();

    let mut first = handle.subscribe().await.unwrap();
    let mut second = handle.subscribe().await.unwrap();

    let mut writers = Vec::new();
    for i in 0..8u32 {
        let store = store.clone();
        let handle = handle.clone();
        writers.push(tokio::spawn(async move {
            place(&store, &handle, Pixel::new(i, i, 0x02BE01FF)).await.unwrap();
        }));
    }
    for writer in writers {
        writer.await.unwrap();
    }

    for subscription in [&mut first, &mut second] {
        let mut seen = Vec::new();
        for _ in 0..8 {
            let pixel = timeout(Duration::from_secs(2), subscription.recv())
                .await
                .unwrap()
                .unwrap();
            seen.push(pixel.x);
        }
        seen.sort_unstable();
        assert_eq!(seen, (0..8).collect::<Vec<_>>());
    }

    for i in 0..8 {
        assert_eq!(store.pixel(i, i).await.unwrap(), 0x02BE01FF);
    }
    handle.stop();
}
