//! End-to-end pipeline tests over in-memory collaborators.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use reelcut_models::{
    BoundingBox, FaceDetection, Highlight, JobId, JobStatus, PoseKeypoint, RenderJob, SceneCut,
    TranscriptSegment, VideoId,
};
use reelcut_signals::{
    KeyphraseExtractor, SegmentScorer, SentimentClassifier, SentimentLabel, SignalResult,
    Summarizer,
};
use reelcut_tracking::{
    FaceDetector, Frame, FrameSource, PoseDetector, SubjectTracker, TrackingError, TrackingResult,
};
use reelcut_worker::{
    EventSink, ExportSettings, FrameDecoder, HighlightDetector, HighlightStore, JobStore,
    MediaStore, RenderOrchestrator, RenderRequest, Renderer, SceneCutSource, StageEvent,
    SubjectAnalyzer, TranscriptSource, WorkerConfig, WorkerError, WorkerResult,
};

// === In-memory collaborators ===

#[derive(Default)]
struct MemoryJobStore {
    jobs: Mutex<HashMap<String, RenderJob>>,
    progress_log: Mutex<Vec<u8>>,
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn create(&self, job: &RenderJob) -> WorkerResult<()> {
        self.jobs
            .lock()
            .unwrap()
            .insert(job.id.to_string(), job.clone());
        Ok(())
    }

    async fn update(&self, job: &RenderJob) -> WorkerResult<()> {
        self.progress_log.lock().unwrap().push(job.progress);
        self.jobs
            .lock()
            .unwrap()
            .insert(job.id.to_string(), job.clone());
        Ok(())
    }

    async fn get(&self, job_id: &JobId) -> WorkerResult<Option<RenderJob>> {
        Ok(self.jobs.lock().unwrap().get(job_id.as_str()).cloned())
    }
}

impl MemoryJobStore {
    fn single_job(&self) -> RenderJob {
        let jobs = self.jobs.lock().unwrap();
        assert_eq!(jobs.len(), 1, "expected exactly one job record");
        jobs.values().next().unwrap().clone()
    }

    fn progress_log(&self) -> Vec<u8> {
        self.progress_log.lock().unwrap().clone()
    }
}

#[derive(Default)]
struct MemoryHighlightStore {
    highlights: Mutex<Vec<Highlight>>,
}

#[async_trait]
impl HighlightStore for MemoryHighlightStore {
    async fn create(&self, highlight: &Highlight) -> WorkerResult<()> {
        self.highlights.lock().unwrap().push(highlight.clone());
        Ok(())
    }
}

/// Job store whose writes fail after the initial record is created.
struct UpdateFailsStore;

#[async_trait]
impl JobStore for UpdateFailsStore {
    async fn create(&self, _job: &RenderJob) -> WorkerResult<()> {
        Ok(())
    }

    async fn update(&self, _job: &RenderJob) -> WorkerResult<()> {
        Err(WorkerError::store_failed("job table unavailable"))
    }

    async fn get(&self, _job_id: &JobId) -> WorkerResult<Option<RenderJob>> {
        Ok(None)
    }
}

struct MapTranscripts(HashMap<String, Vec<TranscriptSegment>>);

#[async_trait]
impl TranscriptSource for MapTranscripts {
    async fn transcript(&self, video_id: &VideoId) -> WorkerResult<Vec<TranscriptSegment>> {
        self.0
            .get(video_id.as_str())
            .cloned()
            .ok_or_else(|| WorkerError::not_found(format!("video {video_id}")))
    }
}

struct FixedSceneCuts(Vec<SceneCut>);

#[async_trait]
impl SceneCutSource for FixedSceneCuts {
    async fn scene_cuts(&self, _video_id: &VideoId) -> WorkerResult<Vec<SceneCut>> {
        Ok(self.0.clone())
    }
}

#[derive(Default)]
struct MemoryMediaStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
    uploads: Mutex<Vec<String>>,
}

#[async_trait]
impl MediaStore for MemoryMediaStore {
    async fn download(&self, path: &str) -> WorkerResult<Vec<u8>> {
        self.blobs
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| WorkerError::not_found(format!("blob {path}")))
    }

    async fn upload(&self, path: &str, bytes: Vec<u8>) -> WorkerResult<String> {
        self.blobs.lock().unwrap().insert(path.to_string(), bytes);
        self.uploads.lock().unwrap().push(path.to_string());
        Ok(path.to_string())
    }
}

#[derive(Default)]
struct RecordingEvents(Mutex<Vec<StageEvent>>);

#[async_trait]
impl EventSink for RecordingEvents {
    async fn publish(&self, event: StageEvent) {
        self.0.lock().unwrap().push(event);
    }
}

// === NLP fakes ===

struct NeutralSentiment;

impl SentimentClassifier for NeutralSentiment {
    fn classify(&self, _text: &str) -> SignalResult<Vec<SentimentLabel>> {
        Ok(vec![SentimentLabel::new("positive", 0.6)])
    }
}

struct NoKeyphrases;

impl KeyphraseExtractor for NoKeyphrases {
    fn extract(&self, _text: &str, _top_k: usize) -> SignalResult<Vec<String>> {
        Ok(vec!["fake phrase".to_string()])
    }
}

struct IdentitySummarizer;

impl Summarizer for IdentitySummarizer {
    fn summarize(&self, text: &str) -> SignalResult<String> {
        Ok(text.to_string())
    }
}

fn scorer() -> Arc<SegmentScorer> {
    Arc::new(SegmentScorer::new(
        Arc::new(NeutralSentiment),
        Arc::new(NoKeyphrases),
        Arc::new(IdentitySummarizer),
    ))
}

// === Media fakes ===

struct NoopRenderer;

#[async_trait]
impl Renderer for NoopRenderer {
    async fn prepare(
        &self,
        _source: &Path,
        _workdir: &Path,
        _request: &RenderRequest,
    ) -> WorkerResult<()> {
        Ok(())
    }

    async fn apply_crop(&self, _workdir: &Path, _request: &RenderRequest) -> WorkerResult<()> {
        Ok(())
    }

    async fn apply_overlays(&self, _workdir: &Path, _request: &RenderRequest) -> WorkerResult<()> {
        Ok(())
    }

    async fn encode(&self, _workdir: &Path, _request: &RenderRequest) -> WorkerResult<Vec<u8>> {
        Ok(b"clip".to_vec())
    }
}

/// Renderer that dies while applying the crop transform.
struct CropExplodes;

#[async_trait]
impl Renderer for CropExplodes {
    async fn prepare(
        &self,
        _source: &Path,
        _workdir: &Path,
        _request: &RenderRequest,
    ) -> WorkerResult<()> {
        Ok(())
    }

    async fn apply_crop(&self, _workdir: &Path, _request: &RenderRequest) -> WorkerResult<()> {
        Err(WorkerError::render_failed("crop filter graph rejected"))
    }

    async fn apply_overlays(&self, _workdir: &Path, _request: &RenderRequest) -> WorkerResult<()> {
        Ok(())
    }

    async fn encode(&self, _workdir: &Path, _request: &RenderRequest) -> WorkerResult<Vec<u8>> {
        Ok(Vec::new())
    }
}

struct SyntheticFrames {
    next: u64,
    count: u64,
}

impl FrameSource for SyntheticFrames {
    fn next_frame(&mut self) -> TrackingResult<Option<Frame>> {
        if self.next >= self.count {
            return Ok(None);
        }
        let index = self.next;
        self.next += 1;
        Ok(Some(Frame {
            index,
            timestamp: index as f64 / 30.0,
            width: 1920,
            height: 1080,
            data: Vec::new(),
        }))
    }

    fn dimensions(&self) -> (u32, u32) {
        (1920, 1080)
    }
}

struct SyntheticDecoder;

impl FrameDecoder for SyntheticDecoder {
    fn open(&self, _path: &Path) -> WorkerResult<Box<dyn FrameSource + Send>> {
        Ok(Box::new(SyntheticFrames { next: 0, count: 60 }))
    }
}

struct UnreadableDecoder;

impl FrameDecoder for UnreadableDecoder {
    fn open(&self, _path: &Path) -> WorkerResult<Box<dyn FrameSource + Send>> {
        Err(TrackingError::decode_failed("container truncated").into())
    }
}

struct CenteredFace;

impl FaceDetector for CenteredFace {
    fn detect_faces(&self, _frame: &Frame) -> TrackingResult<Vec<FaceDetection>> {
        Ok(vec![FaceDetection::from_bbox(
            BoundingBox::new(900.0, 480.0, 120.0, 120.0),
            0.9,
        )])
    }
}

struct NoPose;

impl PoseDetector for NoPose {
    fn detect_pose(&self, _frame: &Frame) -> TrackingResult<Option<Vec<PoseKeypoint>>> {
        Ok(None)
    }
}

// === Fixtures ===

/// 9 segments over 0-50s: eight short ones, then one long segment whose
/// end closes the single candidate window inside the 15-60s target.
fn transcript_fixture() -> Vec<TranscriptSegment> {
    let mut segments: Vec<TranscriptSegment> = (0..8)
        .map(|i| {
            TranscriptSegment::new(
                i as f64 * 1.8,
                (i + 1) as f64 * 1.8,
                "this amazing secret trick is the best thing ever today",
            )
            .unwrap()
        })
        .collect();
    segments.push(
        TranscriptSegment::new(14.4, 50.0, "and everyone watching can win big money now").unwrap(),
    );
    segments
}

fn test_config() -> (WorkerConfig, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = WorkerConfig {
        work_dir: dir.path().to_string_lossy().into_owned(),
        ..WorkerConfig::default()
    };
    (config, dir)
}

fn make_detector(
    transcripts: MapTranscripts,
    cuts: Vec<SceneCut>,
) -> (HighlightDetector, Arc<MemoryJobStore>, Arc<MemoryHighlightStore>, Arc<RecordingEvents>) {
    let jobs = Arc::new(MemoryJobStore::default());
    let highlights = Arc::new(MemoryHighlightStore::default());
    let events = Arc::new(RecordingEvents::default());
    let detector = HighlightDetector::new(
        Arc::new(transcripts),
        Arc::new(FixedSceneCuts(cuts)),
        Arc::clone(&jobs) as Arc<dyn JobStore>,
        Arc::clone(&highlights) as Arc<dyn HighlightStore>,
        Arc::clone(&events) as Arc<dyn EventSink>,
        scorer(),
        WorkerConfig::default(),
    );
    (detector, jobs, highlights, events)
}

// === Highlight detection ===

#[tokio::test]
async fn detect_highlights_end_to_end() {
    let video = VideoId::from_string("video-1");
    let transcripts = MapTranscripts(HashMap::from([(
        "video-1".to_string(),
        transcript_fixture(),
    )]));
    let (detector, jobs, highlights, events) = make_detector(transcripts, vec![SceneCut(48.0)]);

    let selected = detector.detect(&video).await.unwrap();

    assert_eq!(selected.len(), 1);
    let h = &selected[0];
    assert_eq!(h.id, 1);
    assert!((h.duration() - 50.0).abs() < 1e-6);
    assert!((0.0..=1.0).contains(&h.score));
    assert!(h.keywords.len() <= 5);

    // Stored and announced
    assert_eq!(highlights.highlights.lock().unwrap().len(), 1);
    let event_log = events.0.lock().unwrap();
    assert!(matches!(
        event_log.as_slice(),
        [StageEvent::HighlightsDetected { count: 1, .. }]
    ));

    // Job reached terminal state through monotone checkpoints
    let job = jobs.single_job();
    assert_eq!(job.status, JobStatus::Completed);
    assert_eq!(job.progress, 100);
    let log = jobs.progress_log();
    assert_eq!(log, vec![10, 30, 60, 80, 100]);
}

#[tokio::test]
async fn detect_highlights_missing_transcript_fails_job() {
    let video = VideoId::from_string("missing");
    let (detector, jobs, highlights, events) = make_detector(MapTranscripts(HashMap::new()), vec![]);

    let result = detector.detect(&video).await;
    assert!(matches!(result, Err(WorkerError::NotFound(_))));

    let job = jobs.single_job();
    assert_eq!(job.status, JobStatus::Failed);
    assert!(job.error_message.as_deref().unwrap().contains("missing"));
    assert!(highlights.highlights.lock().unwrap().is_empty());
    assert!(events.0.lock().unwrap().is_empty());
}

#[tokio::test]
async fn detect_highlights_surfaces_store_failure() {
    let video = VideoId::from_string("video-1");
    let transcripts = MapTranscripts(HashMap::from([(
        "video-1".to_string(),
        transcript_fixture(),
    )]));
    let highlights = Arc::new(MemoryHighlightStore::default());
    let detector = HighlightDetector::new(
        Arc::new(transcripts),
        Arc::new(FixedSceneCuts(Vec::new())),
        Arc::new(UpdateFailsStore),
        Arc::clone(&highlights) as Arc<dyn HighlightStore>,
        Arc::new(RecordingEvents::default()),
        scorer(),
        WorkerConfig::default(),
    );

    let result = detector.detect(&video).await;
    assert!(matches!(result, Err(WorkerError::StoreFailed(_))));
    assert!(highlights.highlights.lock().unwrap().is_empty());
}

#[tokio::test]
async fn detect_highlights_is_deterministic() {
    let video = VideoId::from_string("video-1");
    let mut runs = Vec::new();
    for _ in 0..2 {
        let transcripts = MapTranscripts(HashMap::from([(
            "video-1".to_string(),
            transcript_fixture(),
        )]));
        let (detector, _, _, _) = make_detector(transcripts, vec![SceneCut(48.0)]);
        let selected = detector.detect(&video).await.unwrap();
        runs.push(
            selected
                .iter()
                .map(|h| (h.id, h.start_time, h.end_time, h.score, h.title.clone()))
                .collect::<Vec<_>>(),
        );
    }
    assert_eq!(runs[0], runs[1]);
}

#[tokio::test]
async fn selected_highlights_never_overlap() {
    // Two windows close back-to-back; both are selectable and disjoint
    let video = VideoId::from_string("video-1");
    let mut segments = transcript_fixture();
    segments.push(TranscriptSegment::new(50.0, 70.0, "another segment of plain talk").unwrap());
    let transcripts = MapTranscripts(HashMap::from([("video-1".to_string(), segments)]));
    let (detector, _, _, _) = make_detector(transcripts, vec![SceneCut(48.0)]);

    let selected = detector.detect(&video).await.unwrap();
    for a in &selected {
        for b in &selected {
            if a.id != b.id {
                assert!(!a.overlaps(b), "{a:?} overlaps {b:?}");
            }
        }
    }
}

// === Render orchestration ===

fn render_request(video: &VideoId) -> RenderRequest {
    let highlight = Highlight::new(1, video.clone(), 0.0, 20.0, 0.8)
        .unwrap()
        .with_title("Test clip");
    RenderRequest {
        highlight,
        aspect: reelcut_models::AspectRatio::Vertical,
        crop_plan: vec![reelcut_models::CropRegion {
            timestamp: 0.0,
            x: 656,
            y: 0,
            width: 608,
            height: 1080,
            confidence: 0.9,
            tracking_method: reelcut_models::TrackingMethod::Face,
        }],
        export: ExportSettings {
            source_path: "videos/v/source.mp4".into(),
            output_path: "videos/v/clip_1.mp4".into(),
            burn_subtitles: false,
            watermark: None,
        },
    }
}

#[tokio::test]
async fn render_clip_end_to_end() {
    let video = VideoId::from_string("v");
    let (config, _guard) = test_config();

    let media = Arc::new(MemoryMediaStore::default());
    media
        .blobs
        .lock()
        .unwrap()
        .insert("videos/v/source.mp4".to_string(), b"source".to_vec());
    let jobs = Arc::new(MemoryJobStore::default());
    let events = Arc::new(RecordingEvents::default());

    let orchestrator = RenderOrchestrator::new(
        Arc::clone(&media) as Arc<dyn MediaStore>,
        Arc::clone(&jobs) as Arc<dyn JobStore>,
        Arc::clone(&events) as Arc<dyn EventSink>,
        Arc::new(NoopRenderer),
        config,
    );

    let job = orchestrator.render(render_request(&video)).await.unwrap();
    assert_eq!(job.status, JobStatus::Completed);
    assert_eq!(job.progress, 100);

    assert_eq!(
        media.uploads.lock().unwrap().as_slice(),
        ["videos/v/clip_1.mp4"]
    );
    assert_eq!(jobs.progress_log(), vec![10, 30, 50, 80, 100]);
    assert!(matches!(
        events.0.lock().unwrap().as_slice(),
        [StageEvent::RenderFinished { .. }]
    ));
}

#[tokio::test]
async fn render_failure_marks_job_failed() {
    let video = VideoId::from_string("v");
    let (config, _guard) = test_config();

    let media = Arc::new(MemoryMediaStore::default());
    media
        .blobs
        .lock()
        .unwrap()
        .insert("videos/v/source.mp4".to_string(), b"source".to_vec());
    let jobs = Arc::new(MemoryJobStore::default());
    let events = Arc::new(RecordingEvents::default());

    let orchestrator = RenderOrchestrator::new(
        Arc::clone(&media) as Arc<dyn MediaStore>,
        Arc::clone(&jobs) as Arc<dyn JobStore>,
        Arc::clone(&events) as Arc<dyn EventSink>,
        Arc::new(CropExplodes),
        config,
    );

    let job = orchestrator.render(render_request(&video)).await.unwrap();
    assert_eq!(job.status, JobStatus::Failed);
    assert!(job
        .error_message
        .as_deref()
        .unwrap()
        .contains("crop filter graph rejected"));
    // Failed before the 50 checkpoint; nothing was uploaded
    assert!(job.progress < 50);
    assert!(media.uploads.lock().unwrap().is_empty());
    assert!(events.0.lock().unwrap().is_empty());
}

// === Subject analysis ===

#[tokio::test]
async fn analyze_subjects_end_to_end() {
    let video = VideoId::from_string("v");
    let (config, _guard) = test_config();

    let media = Arc::new(MemoryMediaStore::default());
    media
        .blobs
        .lock()
        .unwrap()
        .insert("videos/v/source.mp4".to_string(), b"source".to_vec());
    let jobs = Arc::new(MemoryJobStore::default());
    let events = Arc::new(RecordingEvents::default());

    let tracker = Arc::new(SubjectTracker::new(
        Arc::new(CenteredFace),
        Arc::new(NoPose),
        SubjectAnalyzer::tracker_config(&config),
    ));
    let analyzer = SubjectAnalyzer::new(
        Arc::clone(&media) as Arc<dyn MediaStore>,
        Arc::clone(&jobs) as Arc<dyn JobStore>,
        Arc::clone(&events) as Arc<dyn EventSink>,
        Arc::new(SyntheticDecoder),
        tracker,
        config,
    );

    let analysis = analyzer.analyze(&video, "videos/v/source.mp4").await.unwrap();

    // 60 frames sampled every 10th: 6 samples, all with a face
    assert_eq!(analysis.summary.total_faces, 6);
    assert!((analysis.summary.face_detection_rate - 1.0).abs() < 1e-9);

    // Crop plans exist for all three ratios and stay inside the frame
    assert_eq!(analysis.crop_plan.len(), 3);
    for regions in analysis.crop_plan.values() {
        assert_eq!(regions.len(), 6);
        for region in regions {
            assert!(region.is_within(1920, 1080));
        }
    }

    let job = jobs.single_job();
    assert_eq!(job.status, JobStatus::Completed);
    assert_eq!(jobs.progress_log(), vec![10, 30, 60, 80, 100]);
    assert!(matches!(
        events.0.lock().unwrap().as_slice(),
        [StageEvent::SubjectAnalysisReady { .. }]
    ));
}

#[tokio::test]
async fn analyze_subjects_decode_failure_fails_job() {
    let video = VideoId::from_string("v");
    let (config, _guard) = test_config();

    let media = Arc::new(MemoryMediaStore::default());
    media
        .blobs
        .lock()
        .unwrap()
        .insert("videos/v/source.mp4".to_string(), b"garbage".to_vec());
    let jobs = Arc::new(MemoryJobStore::default());
    let events = Arc::new(RecordingEvents::default());

    let tracker = Arc::new(SubjectTracker::new(
        Arc::new(CenteredFace),
        Arc::new(NoPose),
        SubjectAnalyzer::tracker_config(&config),
    ));
    let analyzer = SubjectAnalyzer::new(
        Arc::clone(&media) as Arc<dyn MediaStore>,
        Arc::clone(&jobs) as Arc<dyn JobStore>,
        Arc::clone(&events) as Arc<dyn EventSink>,
        Arc::new(UnreadableDecoder),
        tracker,
        config,
    );

    let result = analyzer.analyze(&video, "videos/v/source.mp4").await;
    assert!(matches!(result, Err(WorkerError::Tracking(_))));

    let job = jobs.single_job();
    assert_eq!(job.status, JobStatus::Failed);
    assert!(job
        .error_message
        .as_deref()
        .unwrap()
        .contains("container truncated"));
    assert!(events.0.lock().unwrap().is_empty());
}

#[tokio::test]
async fn analyze_subjects_missing_media_fails_job() {
    let video = VideoId::from_string("v");
    let (config, _guard) = test_config();

    let media = Arc::new(MemoryMediaStore::default());
    let jobs = Arc::new(MemoryJobStore::default());
    let events = Arc::new(RecordingEvents::default());

    let tracker = Arc::new(SubjectTracker::new(
        Arc::new(CenteredFace),
        Arc::new(NoPose),
        SubjectAnalyzer::tracker_config(&config),
    ));
    let analyzer = SubjectAnalyzer::new(
        Arc::clone(&media) as Arc<dyn MediaStore>,
        Arc::clone(&jobs) as Arc<dyn JobStore>,
        Arc::clone(&events) as Arc<dyn EventSink>,
        Arc::new(SyntheticDecoder),
        tracker,
        config,
    );

    let result = analyzer.analyze(&video, "videos/v/missing.mp4").await;
    assert!(matches!(result, Err(WorkerError::NotFound(_))));

    let job = jobs.single_job();
    assert_eq!(job.status, JobStatus::Failed);
    assert!(events.0.lock().unwrap().is_empty());
}
